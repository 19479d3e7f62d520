// src/scheduler.rs

// Virtual-time task queue. The host (or a test) decides when time moves.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Task<E> {
    id: TaskId,
    deadline: Duration,
    event: E,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, event: E) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            deadline: self.now.saturating_add(delay),
            event,
        });
        id
    }

    /// Returns false if the task already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Time left until the earliest pending task comes due.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.deadline.saturating_sub(self.now))
            .min()
    }

    /// Moves the clock forward and returns every event that came due,
    /// earliest deadline first; ties run in scheduling order.
    pub fn advance(&mut self, delta: Duration) -> Vec<E> {
        self.now = self.now.saturating_add(delta);
        let now = self.now;

        let (mut due, rest): (Vec<Task<E>>, Vec<Task<E>>) =
            self.tasks.drain(..).partition(|t| t.deadline <= now);
        self.tasks = rest;

        due.sort_by_key(|t| (t.deadline, t.id));
        due.into_iter().map(|t| t.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_millis(1000), "a");
        assert!(s.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)), vec!["a"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn orders_by_deadline_then_insertion() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_millis(300), "late");
        s.schedule(Duration::from_millis(100), "early");
        s.schedule(Duration::from_millis(100), "early-second");
        assert_eq!(
            s.advance(Duration::from_secs(1)),
            vec!["early", "early-second", "late"]
        );
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut s = Scheduler::new();
        let id = s.schedule(Duration::from_millis(10), 1);
        s.schedule(Duration::from_millis(10), 2);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.advance(Duration::from_millis(10)), vec![2]);
    }

    #[test]
    fn next_due_in_tracks_earliest_task() {
        let mut s = Scheduler::new();
        assert_eq!(s.next_due_in(), None);
        s.schedule(Duration::from_millis(800), 'b');
        let id = s.schedule(Duration::from_millis(300), 'a');
        s.advance(Duration::from_millis(100));
        assert_eq!(s.next_due_in(), Some(Duration::from_millis(200)));
        s.cancel(id);
        assert_eq!(s.next_due_in(), Some(Duration::from_millis(700)));
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.advance(Duration::from_millis(500));
        s.schedule(Duration::from_millis(100), ());
        assert!(s.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)).len(), 1);
        assert_eq!(s.now(), Duration::from_millis(600));
    }
}
