// src/lib.rs

pub mod catalog;
pub mod config;
pub mod constants;
pub mod database;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod store;

pub use catalog::LevelCatalog;
pub use engine::Engine;
pub use models::{Cue, Difficulty, Feedback, Level, Phase, Settings};
pub use session::{Action, Pacing, SessionState};
pub use store::{KeyValueStore, MemoryStore, ProgressStore, SqliteStore};
