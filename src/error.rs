// src/error.rs

// Gameplay itself never fails; these cover the data and storage edges.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog is empty")]
    Empty,

    #[error("Level ids must be 1..N without gaps: expected {expected}, found {found}")]
    NonDenseId { expected: u32, found: u32 },

    #[error("Level {0} has a non-finite answer")]
    NonFiniteAnswer(u32),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
