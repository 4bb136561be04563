//! Vocabulary Core
//!
//! Word selection with deduplication, plus the content fetchers that turn a
//! selected word into a [`record::WordRecord`]. Every remote collaborator sits
//! behind a narrow trait in [`providers`] so the fallback chains can be tested
//! without the network.

pub mod candidates;
pub mod definition;
pub mod digest;
pub mod lexicon;
pub mod providers;
pub mod record;
pub mod selector;
pub mod store;
pub mod synonyms;

/// Topic label used whenever a word did not come from a topical query.
pub const GENERAL_TOPIC: &str = "general vocabulary";
