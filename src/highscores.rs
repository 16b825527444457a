//! Persisted high score
//!
//! A plain text file holding a single integer. Missing or unreadable files
//! count as no prior high score.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Best score across sessions, backed by a text file
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    best: u64,
}

impl HighScore {
    /// Load the stored high score, defaulting to zero
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(text) => match text.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {} from {}", best, path.display());
                    best
                }
                Err(e) => {
                    log::warn!("Ignoring malformed high score in {}: {}", path.display(), e);
                    0
                }
            },
            Err(e) => {
                log::info!("No high score at {} ({}), starting fresh", path.display(), e);
                0
            }
        };
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a score beats the stored value
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished session's score, persisting it if it is a new best.
    ///
    /// Returns whether the score was a new high score. The in-memory best is
    /// updated even if the write fails.
    pub fn submit(&mut self, score: u64) -> Result<bool> {
        if !self.qualifies(score) {
            return Ok(false);
        }
        self.best = score;
        self.save()?;
        log::info!("New high score {} saved", score);
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        fs::write(&self.path, self.best.to_string())?;
        Ok(())
    }
}
