//! Synonym Fetcher
//!
//! Asks the remote "means like" endpoint first and keeps its ranking. When
//! that yields nothing the local lexicon is used and the result is sorted
//! alphabetically instead. The two orderings are intentionally different.

use crate::lexicon::LexicalDatabase;
use crate::providers::WordsApi;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub const MAX_SYNONYMS: usize = 10;

pub struct SynonymFetcher {
    api: Arc<dyn WordsApi>,
    lexicon: Arc<dyn LexicalDatabase>,
}

impl SynonymFetcher {
    pub fn new(api: Arc<dyn WordsApi>, lexicon: Arc<dyn LexicalDatabase>) -> Self {
        Self { api, lexicon }
    }

    /// Returns up to ten distinct synonyms for `word`.
    pub async fn synonyms_for(&self, word: &str) -> Vec<String> {
        let remote = self.from_provider(word).await;
        if !remote.is_empty() {
            return remote;
        }
        debug!(word = %word, "No remote synonyms, falling back to lexicon");
        self.from_lexicon(word)
    }

    async fn from_provider(&self, word: &str) -> Vec<String> {
        let words = match self.api.means_like(word, MAX_SYNONYMS).await {
            Ok(words) => words,
            Err(e) => {
                warn!(word = %word, error = ?e, "Synonym lookup failed");
                return Vec::new();
            }
        };

        let mut seen = BTreeSet::new();
        words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .take(MAX_SYNONYMS)
            .collect()
    }

    fn from_lexicon(&self, word: &str) -> Vec<String> {
        let lemmas: BTreeSet<String> = self
            .lexicon
            .senses(word)
            .into_iter()
            .flat_map(|sense| sense.lemmas)
            .map(|lemma| lemma.replace('_', " "))
            .filter(|lemma| !lemma.trim().is_empty())
            .collect();
        lemmas.into_iter().take(MAX_SYNONYMS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{JsonLexicon, Sense};
    use crate::providers::MockWordsApi;
    use anyhow::anyhow;
    use std::collections::HashMap;

    fn lexicon_with(word: &str, lemma_sets: &[&[&str]]) -> Arc<dyn LexicalDatabase> {
        let senses = lemma_sets
            .iter()
            .map(|lemmas| Sense {
                gloss: "a gloss".to_string(),
                examples: Vec::new(),
                lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
            })
            .collect();
        Arc::new(JsonLexicon::from_entries(HashMap::from([(
            word.to_string(),
            senses,
        )])))
    }

    #[tokio::test]
    async fn test_provider_order_is_kept() {
        let mut api = MockWordsApi::new();
        api.expect_means_like()
            .withf(|word, max| word == "happy" && *max == MAX_SYNONYMS)
            .returning(|_, _| {
                Ok(vec![
                    "glad".to_string(),
                    "".to_string(),
                    "cheerful".to_string(),
                    "glad".to_string(),
                    "content".to_string(),
                ])
            });

        let fetcher = SynonymFetcher::new(Arc::new(api), Arc::new(JsonLexicon::empty()));
        let synonyms = fetcher.synonyms_for("happy").await;

        assert_eq!(synonyms, vec!["glad", "cheerful", "content"]);
    }

    #[tokio::test]
    async fn test_provider_result_is_capped() {
        let mut api = MockWordsApi::new();
        api.expect_means_like()
            .returning(|_, _| Ok((0..15).map(|i| format!("word{}", i)).collect()));

        let fetcher = SynonymFetcher::new(Arc::new(api), Arc::new(JsonLexicon::empty()));
        let synonyms = fetcher.synonyms_for("many").await;

        assert_eq!(synonyms.len(), MAX_SYNONYMS);
        assert_eq!(synonyms[0], "word0");
    }

    #[tokio::test]
    async fn test_lexicon_fallback_is_sorted_distinct_and_capped() {
        let mut api = MockWordsApi::new();
        api.expect_means_like()
            .returning(|_, _| Err(anyhow!("connection refused")));

        let lexicon = lexicon_with(
            "swift",
            &[
                &["swift", "fast", "speedy"],
                &["rapid", "quick", "fast"],
                &["fleet", "nimble", "prompt", "hasty", "brisk_pace", "expeditious"],
            ],
        );
        let fetcher = SynonymFetcher::new(Arc::new(api), lexicon);
        let synonyms = fetcher.synonyms_for("swift").await;

        let mut sorted = synonyms.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(synonyms, sorted);
        assert_eq!(synonyms.len(), MAX_SYNONYMS);
        assert_eq!(synonyms[0], "brisk pace");
    }

    #[tokio::test]
    async fn test_empty_provider_uses_lexicon() {
        let mut api = MockWordsApi::new();
        api.expect_means_like().returning(|_, _| Ok(vec![]));

        let lexicon = lexicon_with("lucid", &[&["pellucid", "lucid", "limpid"]]);
        let fetcher = SynonymFetcher::new(Arc::new(api), lexicon);

        assert_eq!(
            fetcher.synonyms_for("lucid").await,
            vec!["limpid", "lucid", "pellucid"]
        );
    }

    #[tokio::test]
    async fn test_no_sources_yield_nothing() {
        let mut api = MockWordsApi::new();
        api.expect_means_like().returning(|_, _| Ok(vec![]));

        let fetcher = SynonymFetcher::new(Arc::new(api), Arc::new(JsonLexicon::empty()));
        assert!(fetcher.synonyms_for("zzzzz").await.is_empty());
    }
}
