//! Local lexical-relations database.
//!
//! The database is a JSON export of a WordNet-style resource keyed by word:
//!
//! ```text
//! {
//!   "lucid": [
//!     { "gloss": "transparently clear; easily understandable",
//!       "examples": ["a lucid explanation"],
//!       "lemmas": ["lucid", "limpid", "pellucid"] }
//!   ]
//! }
//! ```
//!
//! Senses are ordered by primacy. Lemma names may use `_` for spaces.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One synonym set for a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Sense {
    pub gloss: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub lemmas: Vec<String>,
}

/// Offline word lookups. Unknown words return no senses.
pub trait LexicalDatabase: Send + Sync {
    fn senses(&self, word: &str) -> Vec<Sense>;
}

/// A [`LexicalDatabase`] held fully in memory.
#[derive(Debug, Clone, Default)]
pub struct JsonLexicon {
    entries: HashMap<String, Vec<Sense>>,
}

impl JsonLexicon {
    /// A lexicon with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: HashMap<String, Vec<Sense>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, senses)| (word.to_lowercase(), senses))
            .collect();
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        let entries: HashMap<String, Vec<Sense>> = serde_json::from_str(&raw)
            .with_context(|| format!("Lexicon {} is not valid JSON", path.display()))?;
        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LexicalDatabase for JsonLexicon {
    fn senses(&self, word: &str) -> Vec<Sense> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}
