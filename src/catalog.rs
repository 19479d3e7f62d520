// src/catalog.rs

use crate::error::CatalogError;
use crate::models::Level;
use log::{debug, info};

/// Read-only, id-ordered collection of levels.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// The levels shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        // Note: This relies on the file strictly existing in src/data/
        let data = include_str!("data/levels.json");
        Self::from_json(data)
    }

    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(data)?;
        Self::new(levels)
    }

    /// Sorts by id and checks the ids are exactly 1..N.
    pub fn new(mut levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        levels.sort_by_key(|l| l.id);

        for (idx, level) in levels.iter().enumerate() {
            let expected = idx as u32 + 1;
            if level.id != expected {
                return Err(CatalogError::NonDenseId {
                    expected,
                    found: level.id,
                });
            }
            if !level.answer.is_finite() {
                return Err(CatalogError::NonFiniteAnswer(level.id));
            }
        }

        info!("Level catalog loaded: {} levels", levels.len());
        Ok(LevelCatalog { levels })
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn find_by_id(&self, id: u32) -> Option<usize> {
        // Dense ids: index is id - 1.
        let index = (id as usize).checked_sub(1)?;
        let found = self.levels.get(index).filter(|l| l.id == id).map(|_| index);
        if found.is_none() {
            debug!("Level id {} not in catalog", id);
        }
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}
