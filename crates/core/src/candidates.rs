//! Candidate Source
//!
//! Fetches a batch of raw candidate words from a word-list provider, with a
//! three-stage widening of the query: topic and starting letter, then topic
//! only, then no filter. A stage is accepted once it yields at least
//! `min_candidates` alphabetic words; a failing stage counts as zero words.

use crate::GENERAL_TOPIC;
use crate::providers::{WordQuery, WordsApi};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Categories a topical query is drawn from.
pub const TOPICS: &[&str] = &[
    "science",
    "emotion",
    "nature",
    "business",
    "art",
    "technology",
    "philosophy",
    "literature",
    "medicine",
    "travel",
];

/// Raw candidates plus the topic label they were fetched under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateBatch {
    pub words: Vec<String>,
    pub topic: String,
}

/// Anything that can propose candidate words.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Returns up to `limit` candidates in random order. Never fails; an
    /// unreachable provider yields an empty batch.
    async fn fetch(&self, limit: usize) -> CandidateBatch;
}

/// A [`CandidateSource`] backed by a remote [`WordsApi`].
///
/// The topic and starting letter are drawn from the source's own RNG, which
/// also shuffles the final batch. Use [`TopicalCandidateSource::with_rng`]
/// with a seeded RNG for reproducible runs.
pub struct TopicalCandidateSource {
    api: Arc<dyn WordsApi>,
    min_candidates: usize,
    rng: Mutex<StdRng>,
}

impl TopicalCandidateSource {
    /// Creates a source that accepts a query stage once it yields at least
    /// `min_candidates` words.
    pub fn new(api: Arc<dyn WordsApi>, min_candidates: usize) -> Self {
        Self::with_rng(api, min_candidates, StdRng::from_os_rng())
    }

    pub fn with_rng(api: Arc<dyn WordsApi>, min_candidates: usize, rng: StdRng) -> Self {
        Self {
            api,
            min_candidates,
            rng: Mutex::new(rng),
        }
    }

    /// Runs one query stage, keeping only alphabetic words.
    async fn stage(&self, query: WordQuery) -> Vec<String> {
        match self.api.words(&query).await {
            Ok(words) => words
                .into_iter()
                .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
                .collect(),
            Err(e) => {
                warn!(?query, error = ?e, "Word list query failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn pick_topic_and_letter(&self) -> (String, char) {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        let topic = TOPICS.choose(&mut *rng).copied().unwrap_or(GENERAL_TOPIC);
        let letter = rng.random_range(b'a'..=b'z') as char;
        (topic.to_string(), letter)
    }

    fn shuffle(&self, words: &mut [String]) {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        words.shuffle(&mut *rng);
    }
}

#[async_trait]
impl CandidateSource for TopicalCandidateSource {
    async fn fetch(&self, limit: usize) -> CandidateBatch {
        let (topic, letter) = self.pick_topic_and_letter();

        let mut words = self
            .stage(WordQuery {
                topic: Some(topic.clone()),
                starts_with: Some(letter),
                max: limit,
            })
            .await;
        let mut label = topic.clone();

        if words.len() < self.min_candidates {
            debug!(%topic, %letter, found = words.len(), "Too few candidates, dropping letter filter");
            words = self
                .stage(WordQuery {
                    topic: Some(topic.clone()),
                    starts_with: None,
                    max: limit,
                })
                .await;
        }

        if words.len() < self.min_candidates {
            debug!(%topic, found = words.len(), "Too few candidates, dropping topic filter");
            words = self
                .stage(WordQuery {
                    topic: None,
                    starts_with: None,
                    max: limit,
                })
                .await;
            label = GENERAL_TOPIC.to_string();
        }

        self.shuffle(&mut words);
        info!(topic = %label, count = words.len(), "Fetched candidate words");
        CandidateBatch {
            words,
            topic: label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockWordsApi;
    use anyhow::anyhow;

    fn numbered(prefix: &str, n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("{}{}", prefix, "x".repeat(i + 1)))
            .collect()
    }

    fn source(api: MockWordsApi, min: usize) -> TopicalCandidateSource {
        TopicalCandidateSource::with_rng(Arc::new(api), min, StdRng::seed_from_u64(7))
    }

    #[tokio::test]
    async fn test_first_stage_accepted_when_enough_words() {
        let mut api = MockWordsApi::new();
        api.expect_words()
            .withf(|q| q.topic.is_some() && q.starts_with.is_some() && q.max == 200)
            .times(1)
            .returning(|_| Ok(numbered("a", 25)));

        let batch = source(api, 20).fetch(200).await;

        assert_eq!(batch.words.len(), 25);
        assert!(TOPICS.contains(&batch.topic.as_str()));
    }

    #[tokio::test]
    async fn test_falls_back_to_topic_only() {
        let mut api = MockWordsApi::new();
        api.expect_words()
            .withf(|q| q.starts_with.is_some())
            .times(1)
            .returning(|_| Ok(numbered("a", 3)));
        api.expect_words()
            .withf(|q| q.topic.is_some() && q.starts_with.is_none())
            .times(1)
            .returning(|_| Ok(numbered("b", 30)));

        let batch = source(api, 20).fetch(200).await;

        assert_eq!(batch.words.len(), 30);
        assert!(batch.words.iter().all(|w| w.starts_with('b')));
        assert!(TOPICS.contains(&batch.topic.as_str()));
    }

    #[tokio::test]
    async fn test_errors_degrade_to_unfiltered_stage() {
        let mut api = MockWordsApi::new();
        api.expect_words()
            .withf(|q| q.topic.is_some())
            .times(2)
            .returning(|_| Err(anyhow!("timed out")));
        api.expect_words()
            .withf(|q| q.topic.is_none() && q.starts_with.is_none())
            .times(1)
            .returning(|_| Ok(numbered("c", 5)));

        let batch = source(api, 20).fetch(200).await;

        assert_eq!(batch.words.len(), 5);
        assert_eq!(batch.topic, GENERAL_TOPIC);
    }

    #[tokio::test]
    async fn test_all_stages_failing_yields_empty_batch() {
        let mut api = MockWordsApi::new();
        api.expect_words()
            .times(3)
            .returning(|_| Err(anyhow!("offline")));

        let batch = source(api, 20).fetch(200).await;

        assert!(batch.words.is_empty());
        assert_eq!(batch.topic, GENERAL_TOPIC);
    }

    #[tokio::test]
    async fn test_non_alphabetic_tokens_are_dropped() {
        let mut api = MockWordsApi::new();
        api.expect_words().times(1).returning(|_| {
            Ok(vec![
                "valid".to_string(),
                "two words".to_string(),
                "co-op".to_string(),
                "r2d2".to_string(),
                String::new(),
                "Proper".to_string(),
            ])
        });

        let mut batch = source(api, 1).fetch(200).await;
        batch.words.sort();

        assert_eq!(batch.words, vec!["Proper".to_string(), "valid".to_string()]);
    }

    #[tokio::test]
    async fn test_stage_with_exactly_threshold_words_is_accepted() {
        let mut api = MockWordsApi::new();
        api.expect_words()
            .withf(|q| q.topic.is_some() && q.starts_with.is_some())
            .times(1)
            .returning(|_| Ok(numbered("d", 20)));

        let batch = source(api, 20).fetch(200).await;

        assert_eq!(batch.words.len(), 20);
        assert!(TOPICS.contains(&batch.topic.as_str()));
    }

    #[tokio::test]
    async fn test_batch_order_is_shuffled() {
        let provider_order = numbered("e", 30);
        let returned = provider_order.clone();

        let mut api = MockWordsApi::new();
        api.expect_words()
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let batch = source(api, 20).fetch(200).await;

        assert_ne!(batch.words, provider_order);
        let mut sorted = batch.words.clone();
        sorted.sort();
        let mut expected = provider_order.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
