//! Definition/Example Fetcher
//!
//! An ordered chain of [`DefinitionStrategy`] values is tried until one
//! produces a definition. A definition without an example gets a synthesized
//! one; when every strategy comes up empty the literal
//! [`DEFINITION_NOT_FOUND`] is returned without an example.

use crate::lexicon::LexicalDatabase;
use crate::providers::{DictionaryApi, EncyclopediaApi};
use crate::record::Definition;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFINITION_NOT_FOUND: &str = "Definition not found.";

const DISAMBIGUATION_MARKER: &str = "may refer to";

/// A single source of definitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefinitionStrategy: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Returns a usable definition, or `None` to pass to the next strategy.
    async fn attempt(&self, word: &str) -> Option<Definition>;
}

/// Runs the definition strategies in order and returns the first hit.
pub struct DefinitionFetcher {
    strategies: Vec<Box<dyn DefinitionStrategy>>,
}

impl DefinitionFetcher {
    /// Creates a fetcher over `strategies`, tried first to last.
    pub fn new(strategies: Vec<Box<dyn DefinitionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns the definition of `word`. Always produces a value: the literal
    /// [`DEFINITION_NOT_FOUND`] stands in when no strategy succeeds.
    pub async fn definition_for(&self, word: &str) -> Definition {
        for strategy in &self.strategies {
            let Some(mut definition) = strategy.attempt(word).await else {
                debug!(word = %word, strategy = strategy.name(), "No definition from strategy");
                continue;
            };
            info!(word = %word, strategy = strategy.name(), "Found definition");
            if definition.example.is_none() {
                definition.example = Some(synthesize_example(word));
            }
            return definition;
        }

        warn!(word = %word, "No definition found in any source");
        Definition::new(DEFINITION_NOT_FOUND, None)
    }
}

/// Builds a filler usage example around `word`.
pub fn synthesize_example(word: &str) -> String {
    format!(
        "Try using \"{}\" in a sentence of your own today to make it stick.",
        word
    )
}

/// Ensures `text` ends with sentence-final punctuation.
fn terminate(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits an encyclopedia extract into a definition and an example.
///
/// Extracts containing the disambiguation marker are rejected. The first
/// sentence is the definition; the next two, if present, form the example.
pub fn parse_extract(extract: &str) -> Option<Definition> {
    if extract.to_lowercase().contains(DISAMBIGUATION_MARKER) {
        return None;
    }

    let sentences: Vec<&str> = extract
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let first = sentences.first()?;

    let rest: Vec<&str> = sentences
        .iter()
        .skip(1)
        .take(2)
        .map(|s| s.trim_end_matches('.'))
        .collect();
    let example = (!rest.is_empty()).then(|| terminate(&rest.join(". ")));

    Some(Definition::new(terminate(first), example))
}

/// Definitions from an encyclopedia page summary.
pub struct EncyclopediaStrategy {
    api: Arc<dyn EncyclopediaApi>,
}

impl EncyclopediaStrategy {
    pub fn new(api: Arc<dyn EncyclopediaApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DefinitionStrategy for EncyclopediaStrategy {
    fn name(&self) -> &'static str {
        "encyclopedia"
    }

    async fn attempt(&self, word: &str) -> Option<Definition> {
        let summary = match self.api.summary(word).await {
            Ok(summary) => summary?,
            Err(e) => {
                warn!(word = %word, error = ?e, "Encyclopedia lookup failed");
                return None;
            }
        };
        if summary.kind.as_deref() == Some("disambiguation") {
            return None;
        }
        parse_extract(&summary.extract)
    }
}

/// Definitions from a dictionary provider; the first sense wins.
pub struct DictionaryStrategy {
    api: Arc<dyn DictionaryApi>,
}

impl DictionaryStrategy {
    pub fn new(api: Arc<dyn DictionaryApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DefinitionStrategy for DictionaryStrategy {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn attempt(&self, word: &str) -> Option<Definition> {
        let senses = match self.api.senses(word).await {
            Ok(senses) => senses,
            Err(e) => {
                warn!(word = %word, error = ?e, "Dictionary lookup failed");
                return None;
            }
        };
        let sense = senses.into_iter().next()?;
        Some(Definition::new(
            terminate(&capitalize(&sense.definition)),
            sense.example,
        ))
    }
}

/// Definitions from the gloss of the word's first lexicon sense.
pub struct LexiconStrategy {
    lexicon: Arc<dyn LexicalDatabase>,
}

impl LexiconStrategy {
    pub fn new(lexicon: Arc<dyn LexicalDatabase>) -> Self {
        Self { lexicon }
    }
}

#[async_trait]
impl DefinitionStrategy for LexiconStrategy {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn attempt(&self, word: &str) -> Option<Definition> {
        let sense = self.lexicon.senses(word).into_iter().next()?;
        let gloss = sense.gloss.trim();
        if gloss.is_empty() {
            return None;
        }
        let example = sense
            .examples
            .into_iter()
            .map(|e| e.trim().to_string())
            .find(|e| !e.is_empty());
        Some(Definition::new(format!("{}.", capitalize(gloss)), example))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{JsonLexicon, Sense};
    use crate::providers::{DictionarySense, MockDictionaryApi, MockEncyclopediaApi, Summary};
    use anyhow::anyhow;
    use std::collections::HashMap;

    fn lexicon(word: &str, gloss: &str, examples: &[&str]) -> Arc<dyn LexicalDatabase> {
        Arc::new(JsonLexicon::from_entries(HashMap::from([(
            word.to_string(),
            vec![Sense {
                gloss: gloss.to_string(),
                examples: examples.iter().map(|e| e.to_string()).collect(),
                lemmas: vec![word.to_string()],
            }],
        )])))
    }

    fn failing_encyclopedia() -> MockEncyclopediaApi {
        let mut api = MockEncyclopediaApi::new();
        api.expect_summary()
            .returning(|_| Err(anyhow!("timed out")));
        api
    }

    fn summary(extract: &str) -> Option<Summary> {
        Some(Summary {
            kind: Some("standard".to_string()),
            extract: extract.to_string(),
        })
    }

    #[test]
    fn test_parse_extract_splits_sentences() {
        let parsed = parse_extract(
            "Entropy is a measure of disorder. It appears in thermodynamics. \
             It also appears in information theory. It has many uses.",
        )
        .unwrap();

        assert_eq!(parsed.text, "Entropy is a measure of disorder.");
        assert_eq!(
            parsed.example.as_deref(),
            Some("It appears in thermodynamics. It also appears in information theory.")
        );
    }

    #[test]
    fn test_parse_extract_single_sentence_has_no_example() {
        let parsed = parse_extract("A lucid dream is a dream.").unwrap();
        assert_eq!(parsed.text, "A lucid dream is a dream.");
        assert_eq!(parsed.example, None);
    }

    #[test]
    fn test_parse_extract_rejects_disambiguation() {
        assert!(parse_extract("Mercury May Refer To several things.").is_none());
        assert!(parse_extract("").is_none());
    }

    #[tokio::test]
    async fn test_encyclopedia_strategy_wins_first() {
        let mut api = MockEncyclopediaApi::new();
        api.expect_summary()
            .withf(|title| title == "serendipity")
            .returning(|_| Ok(summary("Serendipity is an unplanned fortunate discovery. The term was coined in 1754")));

        let fetcher = DefinitionFetcher::new(vec![
            Box::new(EncyclopediaStrategy::new(Arc::new(api))),
            Box::new(LexiconStrategy::new(lexicon("serendipity", "good luck", &[]))),
        ]);
        let definition = fetcher.definition_for("serendipity").await;

        assert_eq!(definition.text, "Serendipity is an unplanned fortunate discovery.");
        assert_eq!(
            definition.example.as_deref(),
            Some("The term was coined in 1754.")
        );
    }

    #[tokio::test]
    async fn test_disambiguation_page_falls_through_to_lexicon() {
        let mut api = MockEncyclopediaApi::new();
        api.expect_summary()
            .returning(|_| Ok(summary("Lucid may refer to: a band, a software product.")));

        let fetcher = DefinitionFetcher::new(vec![
            Box::new(EncyclopediaStrategy::new(Arc::new(api))),
            Box::new(LexiconStrategy::new(lexicon(
                "lucid",
                "transparently clear; easily understandable",
                &["a lucid explanation"],
            ))),
        ]);
        let definition = fetcher.definition_for("lucid").await;

        assert_eq!(
            definition.text,
            "Transparently clear; easily understandable."
        );
        assert_eq!(definition.example.as_deref(), Some("a lucid explanation"));
    }

    #[tokio::test]
    async fn test_missing_example_is_synthesized() {
        let fetcher = DefinitionFetcher::new(vec![
            Box::new(EncyclopediaStrategy::new(Arc::new(failing_encyclopedia()))),
            Box::new(LexiconStrategy::new(lexicon("placid", "calm and peaceful", &[]))),
        ]);
        let definition = fetcher.definition_for("placid").await;

        assert_eq!(definition.text, "Calm and peaceful.");
        let example = definition.example.unwrap();
        assert!(example.contains("placid"));
        assert_eq!(example, synthesize_example("placid"));
    }

    #[tokio::test]
    async fn test_all_sources_fail_returns_literal_default() {
        let mut dictionary = MockDictionaryApi::new();
        dictionary
            .expect_senses()
            .returning(|_| Err(anyhow!("offline")));

        let fetcher = DefinitionFetcher::new(vec![
            Box::new(EncyclopediaStrategy::new(Arc::new(failing_encyclopedia()))),
            Box::new(DictionaryStrategy::new(Arc::new(dictionary))),
            Box::new(LexiconStrategy::new(Arc::new(JsonLexicon::empty()))),
        ]);
        let definition = fetcher.definition_for("xyzzy").await;

        assert_eq!(definition, Definition::new("Definition not found.", None));
    }

    #[tokio::test]
    async fn test_dictionary_strategy_uses_first_sense() {
        let mut dictionary = MockDictionaryApi::new();
        dictionary.expect_senses().returning(|_| {
            Ok(vec![
                DictionarySense {
                    definition: "showing great attention to detail".to_string(),
                    example: Some("a meticulous inspection".to_string()),
                },
                DictionarySense {
                    definition: "second sense".to_string(),
                    example: None,
                },
            ])
        });

        let definition = DictionaryStrategy::new(Arc::new(dictionary))
            .attempt("meticulous")
            .await
            .unwrap();

        assert_eq!(definition.text, "Showing great attention to detail.");
        assert_eq!(definition.example.as_deref(), Some("a meticulous inspection"));
    }

    #[tokio::test]
    async fn test_strategies_are_tried_in_order() {
        let mut first = MockDefinitionStrategy::new();
        first.expect_name().return_const("first");
        first.expect_attempt().times(1).returning(|_| None);

        let mut second = MockDefinitionStrategy::new();
        second.expect_name().return_const("second");
        second
            .expect_attempt()
            .times(1)
            .returning(|_| Some(Definition::new("From second.", Some("ex".to_string()))));

        let mut third = MockDefinitionStrategy::new();
        third.expect_name().return_const("third");
        third.expect_attempt().never();

        let fetcher =
            DefinitionFetcher::new(vec![Box::new(first), Box::new(second), Box::new(third)]);
        let definition = fetcher.definition_for("word").await;

        assert_eq!(definition.text, "From second.");
        assert_eq!(definition.example.as_deref(), Some("ex"));
    }
}
