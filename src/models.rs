// src/models.rs

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Data Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
    Expert = 4,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => DIFFICULTY_MULTIPLIER_EASY,
            Difficulty::Medium => DIFFICULTY_MULTIPLIER_MEDIUM,
            Difficulty::Hard => DIFFICULTY_MULTIPLIER_HARD,
            Difficulty::Expert => DIFFICULTY_MULTIPLIER_EXPERT,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One puzzle: a visible sequence prefix and the hidden next term.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    pub pattern: Vec<f64>,
    pub answer: f64,
    pub difficulty: Difficulty,
    pub hint: String,
    pub logic: String,
}

// --- Session Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Home,
    LevelSelect,
    Playing,
    Summary,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Home => "home",
            Phase::LevelSelect => "levels",
            Phase::Playing => "playing",
            Phase::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Wrong,
}

/// Audio/haptic notifications handed to the feedback collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Success,
    Error,
    Vibrate { millis: u64 },
    MusicOn,
    MusicOff,
}

/// Player-facing toggles. Session-local, seeded from config.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub sound: bool,
    pub vibration: bool,
    pub music: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sound: true,
            vibration: true,
            music: false,
        }
    }
}

impl Settings {
    pub fn music_playing(&self) -> bool {
        self.music && self.sound
    }
}
