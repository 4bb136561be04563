//! Assembles the daily [`WordRecord`]: select a word, then gather its
//! synonyms and definition, one step after the other.

use crate::definition::DefinitionFetcher;
use crate::record::WordRecord;
use crate::selector::{SelectError, WordSelector};
use crate::synonyms::SynonymFetcher;

/// The full daily pipeline from word selection to a finished [`WordRecord`].
pub struct WordOfTheDay {
    selector: WordSelector,
    synonyms: SynonymFetcher,
    definitions: DefinitionFetcher,
}

impl WordOfTheDay {
    pub fn new(
        selector: WordSelector,
        synonyms: SynonymFetcher,
        definitions: DefinitionFetcher,
    ) -> Self {
        Self {
            selector,
            synonyms,
            definitions,
        }
    }

    pub fn selector(&self) -> &WordSelector {
        &self.selector
    }

    /// Selects a word, records it as sent, and gathers its content.
    ///
    /// Only selection can fail; the synonym and definition steps degrade to
    /// empty or default values.
    pub async fn compose(&mut self) -> Result<WordRecord, SelectError> {
        let candidate = self.selector.select_word().await?;
        let synonyms = self.synonyms.synonyms_for(&candidate.word).await;
        let definition = self.definitions.definition_for(&candidate.word).await;

        Ok(WordRecord {
            word: candidate.word,
            topic: candidate.topic,
            definition: definition.text,
            example: definition.example,
            synonyms,
        })
    }
}
