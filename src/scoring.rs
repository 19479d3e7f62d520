// src/scoring.rs

use crate::constants::*;
use crate::models::Difficulty;

/// Points awarded for solving a level after `attempts` wrong submissions.
///
/// `max(20, floor(100 * multiplier) - 20 * attempts)`. There is no ceiling on
/// attempts; every solve earns at least the floor.
pub fn score(difficulty: Difficulty, attempts: u32) -> u64 {
    let base = (BASE_POINTS * difficulty.multiplier()).floor() as u64;
    let penalty = ATTEMPT_PENALTY.saturating_mul(u64::from(attempts));
    base.saturating_sub(penalty).max(MIN_AWARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_try_awards_by_tier() {
        assert_eq!(score(Difficulty::Easy, 0), 100);
        assert_eq!(score(Difficulty::Medium, 0), 150);
        assert_eq!(score(Difficulty::Hard, 0), 200);
        assert_eq!(score(Difficulty::Expert, 0), 300);
    }

    #[test]
    fn penalty_per_wrong_attempt() {
        assert_eq!(score(Difficulty::Easy, 1), 80);
        assert_eq!(score(Difficulty::Medium, 2), 110);
        assert_eq!(score(Difficulty::Expert, 5), 200);
    }

    #[test]
    fn floor_is_reached_and_held() {
        assert_eq!(score(Difficulty::Easy, 4), 20);
        assert_eq!(score(Difficulty::Easy, 10), 20);
        assert_eq!(score(Difficulty::Expert, u32::MAX), 20);
    }

    #[test]
    fn never_increases_with_attempts() {
        for d in Difficulty::ALL {
            let mut prev = score(d, 0);
            for a in 1..40 {
                let s = score(d, a);
                assert!(s <= prev, "{d} at {a}: {s} > {prev}");
                assert!(s >= MIN_AWARD);
                prev = s;
            }
        }
    }

    #[test]
    fn strictly_increasing_in_tier_on_first_try() {
        let scores: Vec<u64> = Difficulty::ALL.iter().map(|d| score(*d, 0)).collect();
        assert!(scores.windows(2).all(|w| w[0] < w[1]));
    }
}
