//! Sent-Word Log
//!
//! A flat JSON array of every word that has already been mailed. The file is
//! rewritten in full on each insert; a missing or unreadable file is simply
//! the empty log. Only one process is expected to touch the file at a time.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Failures while persisting the log.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write sent-word log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize sent-word log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted set of words already sent. Entries are always lowercase.
#[derive(Debug, Clone)]
pub struct SentWordLog {
    path: PathBuf,
}

impl SentWordLog {
    /// Creates a log backed by the file at `path`. The file is not touched
    /// until the first [`load`](Self::load) or [`add`](Self::add).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every recorded word. Absence and corruption both read as empty.
    pub fn load(&self) -> BTreeSet<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeSet::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = ?e, "Could not read sent-word log, treating as empty");
                return BTreeSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(words) => words.into_iter().map(|w| w.to_lowercase()).collect(),
            Err(e) => {
                warn!(path = %self.path.display(), error = ?e, "Sent-word log is corrupt, treating as empty");
                BTreeSet::new()
            }
        }
    }

    /// Records `word` (lowercased) and rewrites the whole file.
    pub fn add(&self, word: &str) -> Result<(), StoreError> {
        let mut words = self.load();
        words.insert(word.to_lowercase());

        let list: Vec<&String> = words.iter().collect();
        let json = serde_json::to_string_pretty(&list)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(word = %word, total = words.len(), "Recorded sent word");
        Ok(())
    }

    /// Deletes the log file. A missing file is not an error.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Cleared sent-word log"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = ?e, "Failed to clear sent-word log")
            }
        }
    }
}
