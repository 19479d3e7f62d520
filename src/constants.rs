// src/constants.rs

// --- Scoring ---
pub const BASE_POINTS: f64 = 100.0;
pub const ATTEMPT_PENALTY: u64 = 20; // Points lost per wrong submission
pub const MIN_AWARD: u64 = 20; // Floor, never zero

pub const DIFFICULTY_MULTIPLIER_EASY: f64 = 1.0;
pub const DIFFICULTY_MULTIPLIER_MEDIUM: f64 = 1.5;
pub const DIFFICULTY_MULTIPLIER_HARD: f64 = 2.0;
pub const DIFFICULTY_MULTIPLIER_EXPERT: f64 = 3.0;

// --- Pacing (milliseconds) ---
pub const CORRECT_DELAY_MS: u64 = 1000; // Correct -> Summary
pub const WRONG_DELAY_MS: u64 = 1000; // Wrong -> feedback cleared

// --- Feedback ---
pub const VIBRATION_MS: u64 = 200;

// --- Persistence ---
pub const UNLOCKED_KEY: &str = "gtl_unlocked";
pub const SCORE_KEY: &str = "gtl_score";
pub const FIRST_LEVEL_ID: u32 = 1;

pub const APP_DIR_NAME: &str = "guess-the-logic";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATABASE_FILE_NAME: &str = "guess_the_logic.db";
