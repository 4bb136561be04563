//! Word Selector
//!
//! Picks one word that has not been sent before. Candidates come from a
//! [`CandidateSource`]; when it returns nothing the built-in
//! [`FALLBACK_WORDS`] are used instead. If every candidate has already been
//! sent the log is cleared and selection is retried once.

use crate::GENERAL_TOPIC;
use crate::candidates::CandidateSource;
use crate::record::Candidate;
use crate::store::SentWordLog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Words used when the candidate source comes back empty. Every entry passes
/// [`is_eligible`] against an empty log.
pub const FALLBACK_WORDS: &[&str] = &[
    "lucid",
    "vivid",
    "serene",
    "candid",
    "placid",
    "ardent",
    "astute",
    "benign",
    "frugal",
    "gregarious",
    "meticulous",
    "resilient",
    "tenacious",
    "verbose",
    "zealous",
];

/// One initial attempt plus one retry after clearing the log.
const MAX_ATTEMPTS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("No eligible word found after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Thresholds governing candidate fetching and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Maximum number of raw candidates requested.
    pub candidate_limit: usize,
    /// Words must be strictly longer than this many characters.
    pub min_word_length: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 200,
            min_word_length: 4,
        }
    }
}

/// Whether `word` may be sent: unseen, long enough, lowercase letters only.
pub fn is_eligible(word: &str, sent: &BTreeSet<String>, min_word_length: usize) -> bool {
    word.chars().count() > min_word_length
        && word.chars().all(|c| c.is_alphabetic() && c.is_lowercase())
        && !sent.contains(word)
}

fn eligible<'a, I>(words: I, sent: &BTreeSet<String>, min_word_length: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .filter(|w| is_eligible(w, sent, min_word_length))
        .map(str::to_string)
        .collect()
}

/// Chooses unsent words and records them in the [`SentWordLog`].
///
/// The selector owns its RNG so that tests can seed it through
/// [`WordSelector::with_rng`].
pub struct WordSelector {
    log: SentWordLog,
    source: Arc<dyn CandidateSource>,
    config: SelectionConfig,
    rng: StdRng,
}

impl WordSelector {
    pub fn new(log: SentWordLog, source: Arc<dyn CandidateSource>, config: SelectionConfig) -> Self {
        Self::with_rng(log, source, config, StdRng::from_os_rng())
    }

    pub fn with_rng(
        log: SentWordLog,
        source: Arc<dyn CandidateSource>,
        config: SelectionConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            log,
            source,
            config,
            rng,
        }
    }

    pub fn log(&self) -> &SentWordLog {
        &self.log
    }

    /// Selects an unsent word and records it in the log before returning.
    ///
    /// When every candidate has already been sent, the log is cleared and
    /// selection runs once more against the fresh log.
    ///
    /// # Returns
    ///
    /// The chosen word with its topic label, or [`SelectError::Exhausted`]
    /// if no word could be chosen even after the reset.
    pub async fn select_word(&mut self) -> Result<Candidate, SelectError> {
        for attempt in 0..MAX_ATTEMPTS {
            let sent = self.log.load();
            let batch = self.source.fetch(self.config.candidate_limit).await;

            let (mut pool, mut topic) = if batch.words.is_empty() {
                warn!("Candidate source returned nothing, using fallback words");
                (
                    eligible(FALLBACK_WORDS.iter().copied(), &sent, self.config.min_word_length),
                    GENERAL_TOPIC.to_string(),
                )
            } else {
                (
                    eligible(
                        batch.words.iter().map(String::as_str),
                        &sent,
                        self.config.min_word_length,
                    ),
                    batch.topic,
                )
            };

            // After a reset only noisy remote output can leave the pool empty.
            if pool.is_empty() && attempt > 0 {
                pool = eligible(FALLBACK_WORDS.iter().copied(), &sent, self.config.min_word_length);
                topic = GENERAL_TOPIC.to_string();
            }

            let Some(word) = pool.choose(&mut self.rng).cloned() else {
                warn!(
                    attempt = attempt + 1,
                    sent = sent.len(),
                    "No eligible candidates left, clearing sent-word log"
                );
                self.log.clear();
                continue;
            };

            if let Err(e) = self.log.add(&word) {
                warn!(word = %word, error = ?e, "Failed to record sent word");
            }
            info!(word = %word, topic = %topic, eligible = pool.len(), "Selected word");
            return Ok(Candidate { word, topic });
        }

        Err(SelectError::Exhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}
