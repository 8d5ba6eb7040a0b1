//! Best score and best distance records
//!
//! Persisted as a small JSON file next to the game. Writes only happen when a
//! value strictly beats the stored best.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format_km;

/// Best values seen across runs; `None` until the first run is recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecords {
    pub best_score: Option<u64>,
    pub best_distance: Option<u64>,
}

impl BestRecords {
    /// Menu line: `"N/A"` or `"score; x.y km"`
    pub fn display(&self) -> String {
        match (self.best_score, self.best_distance) {
            (None, None) => "N/A".to_string(),
            (score, distance) => format!(
                "{}; {}",
                score.unwrap_or(0),
                format_km(distance.unwrap_or(0))
            ),
        }
    }
}

/// Persistent store for best records
pub trait ScoreStore {
    fn best(&self) -> BestRecords;

    /// Store `score` if it beats the best; true if written
    fn record_score(&mut self, score: u64) -> bool;

    /// Store `distance` if it beats the best; true if written
    fn record_distance(&mut self, distance: u64) -> bool;
}

fn beats(candidate: u64, best: Option<u64>) -> bool {
    candidate > best.unwrap_or(0)
}

/// In-memory store, also used by tests and headless runs
impl ScoreStore for BestRecords {
    fn best(&self) -> BestRecords {
        *self
    }

    fn record_score(&mut self, score: u64) -> bool {
        if !beats(score, self.best_score) {
            return false;
        }
        self.best_score = Some(score);
        true
    }

    fn record_distance(&mut self, distance: u64) -> bool {
        if !beats(distance, self.best_distance) {
            return false;
        }
        self.best_distance = Some(distance);
        true
    }
}

/// Store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: BestRecords,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing or unreadable file starts fresh
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match Self::read(&path) {
            Ok(records) => {
                log::info!("Loaded best records from {}", path.display());
                records
            }
            Err(e) => {
                log::info!("No best records at {} ({}), starting fresh", path.display(), e);
                BestRecords::default()
            }
        };
        Self { path, records }
    }

    fn read(path: &Path) -> Result<BestRecords> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current records to disk
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, json)?;
        log::info!("Best records saved to {}", self.path.display());
        Ok(())
    }

    fn persist(&self) {
        // Losing a record must never block the game-over flow
        if let Err(e) = self.save() {
            log::warn!("Failed to save best records: {}", e);
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn best(&self) -> BestRecords {
        self.records
    }

    fn record_score(&mut self, score: u64) -> bool {
        let written = self.records.record_score(score);
        if written {
            self.persist();
        }
        written
    }

    fn record_distance(&mut self, distance: u64) -> bool {
        let written = self.records.record_distance(distance);
        if written {
            self.persist();
        }
        written
    }
}
