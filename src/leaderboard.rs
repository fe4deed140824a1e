//! High-score persistence.
//!
//! Stores keep only the best [`LEADERBOARD_CAPACITY`] runs, sorted by score
//! descending. Reads never fail: a missing, unreadable or corrupt store is
//! treated as empty. Writes report typed errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Difficulty, LEADERBOARD_CAPACITY};

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Final score.
    pub score: u64,
    /// Final distance, floored.
    pub distance: u64,
    /// Unix time of the run, in seconds.
    pub timestamp: u64,
    /// Tier the run was played on.
    pub difficulty: Difficulty,
}

impl LeaderboardEntry {
    /// Entry stamped with the current wall-clock time.
    #[must_use]
    pub fn now(name: impl Into<String>, score: u64, distance: u64, difficulty: Difficulty) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Self {
            name: name.into(),
            score,
            distance,
            timestamp,
            difficulty,
        }
    }
}

/// Errors raised while writing the leaderboard.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The store could not be written.
    #[error("failed to write leaderboard {path}: {source}")]
    Write {
        /// Store location.
        path: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// Entries could not be serialised.
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence medium for scores.
pub trait ScoreStore {
    /// Records a run, keeping only the best entries.
    ///
    /// # Errors
    /// Returns [`LeaderboardError`] if the store cannot be written.
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), LeaderboardError>;

    /// Up to `n` entries, best first.
    fn top(&self, n: usize) -> Vec<LeaderboardEntry>;

    /// Highest recorded score, if any.
    fn best_score(&self) -> Option<u64> {
        self.top(1).first().map(|entry| entry.score)
    }
}

/// Inserts `entry`, re-sorts by score descending and trims to capacity.
///
/// Equal scores keep insertion order, so an older run stays ahead of a newer
/// one with the same score.
fn insert_ranked(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAPACITY);
}

fn top_n(entries: &[LeaderboardEntry], n: usize) -> Vec<LeaderboardEntry> {
    entries.iter().take(n).cloned().collect()
}

/// Leaderboard held in memory for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: Vec<LeaderboardEntry>,
}

impl ScoreStore for MemoryStore {
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), LeaderboardError> {
        insert_ranked(&mut self.entries, entry);
        Ok(())
    }

    fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        top_n(&self.entries, n)
    }
}

/// Leaderboard persisted as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Vec<LeaderboardEntry>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading whatever can be read.
    #[must_use]
    pub fn open(location: impl Into<PathBuf>) -> Self {
        let path = location.into();
        let entries = load_entries(&path);
        debug!("loaded {} leaderboard entries from {}", entries.len(), path.display());
        Self { path, entries }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), LeaderboardError> {
        let body = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, body).map_err(|source| LeaderboardError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn load_entries(path: &Path) -> Vec<LeaderboardEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!("leaderboard {} unreadable, starting empty: {err}", path.display());
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<LeaderboardEntry>>(&content) {
        Ok(mut entries) => {
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            entries.truncate(LEADERBOARD_CAPACITY);
            entries
        }
        Err(err) => {
            warn!("leaderboard {} is corrupt, starting empty: {err}", path.display());
            Vec::new()
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn append(&mut self, entry: LeaderboardEntry) -> Result<(), LeaderboardError> {
        insert_ranked(&mut self.entries, entry);
        self.save()
    }

    fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        top_n(&self.entries, n)
    }
}
