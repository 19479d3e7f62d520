// src/store.rs

use crate::constants::*;
use crate::database;
use crate::error::StoreError;
use chrono::Utc;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Minimal get/set storage the progress adapter is written against.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

// --- SQLite backend ---

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(SqliteStore {
            conn: database::open(path)?,
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(SqliteStore {
            conn: database::open_in_memory()?,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

// --- In-memory backend ---

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

// --- Progress adapter ---

/// Durable unlocked-set and score. Reads fall back to defaults, writes are
/// best-effort: failures are logged and dropped.
pub struct ProgressStore {
    kv: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        ProgressStore { kv: Box::new(kv) }
    }

    pub fn default_unlocked() -> BTreeSet<u32> {
        BTreeSet::from([FIRST_LEVEL_ID])
    }

    pub fn load_unlocked(&self) -> BTreeSet<u32> {
        let raw = match self.kv.get(UNLOCKED_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default_unlocked(),
            Err(e) => {
                warn!("Failed to read unlocked levels, using defaults: {}", e);
                return Self::default_unlocked();
            }
        };

        match serde_json::from_str::<Vec<i64>>(&raw) {
            Ok(ids) => {
                let mut set: BTreeSet<u32> = ids
                    .into_iter()
                    .filter_map(|id| u32::try_from(id).ok())
                    .filter(|id| *id >= FIRST_LEVEL_ID)
                    .collect();
                set.insert(FIRST_LEVEL_ID);
                debug!("Loaded unlocked levels: {:?}", set);
                set
            }
            Err(e) => {
                warn!("Malformed unlocked levels {:?}, using defaults: {}", raw, e);
                Self::default_unlocked()
            }
        }
    }

    pub fn load_score(&self) -> u64 {
        match self.kv.get(SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<u64>().unwrap_or_else(|e| {
                warn!("Malformed score {:?}, using 0: {}", raw, e);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("Failed to read score, using 0: {}", e);
                0
            }
        }
    }

    pub fn save_unlocked(&mut self, unlocked: &BTreeSet<u32>) {
        let ids: Vec<u32> = unlocked.iter().copied().collect();
        let result = serde_json::to_string(&ids)
            .map_err(StoreError::from)
            .and_then(|raw| self.kv.set(UNLOCKED_KEY, &raw));
        if let Err(e) = result {
            warn!("Dropped unlocked-levels write: {}", e);
        }
    }

    pub fn save_score(&mut self, score: u64) {
        if let Err(e) = self.kv.set(SCORE_KEY, &score.to_string()) {
            warn!("Dropped score write: {}", e);
        }
    }

    pub fn reset(&mut self) {
        if let Err(e) = self.kv.clear() {
            warn!("Failed to clear progress: {}", e);
        }
    }
}
