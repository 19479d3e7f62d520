// src/config.rs

use crate::constants::*;
use crate::error::ConfigError;
use crate::models::Settings;
use crate::session::Pacing;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub correct_delay_ms: u64,
    pub wrong_delay_ms: u64,
    pub sound: bool,
    pub vibration: bool,
    pub music: bool,
    /// Relative paths resolve against the data directory.
    pub database_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let settings = Settings::default();
        GameConfig {
            correct_delay_ms: CORRECT_DELAY_MS,
            wrong_delay_ms: WRONG_DELAY_MS,
            sound: settings.sound,
            vibration: settings.vibration,
            music: settings.music,
            database_file: PathBuf::from(DATABASE_FILE_NAME),
        }
    }
}

impl GameConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Missing file means defaults; a broken one is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                info!("Loaded config from {:?}", path);
                cfg
            }
            Err(e) => {
                warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            correct_delay: Duration::from_millis(self.correct_delay_ms),
            wrong_delay: Duration::from_millis(self.wrong_delay_ms),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            sound: self.sound,
            vibration: self.vibration,
            music: self.music,
        }
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        if self.database_file.is_absolute() {
            self.database_file.clone()
        } else {
            data_dir.join(&self.database_file)
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}
