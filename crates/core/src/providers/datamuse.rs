//! Datamuse word-finding API client.

use super::{WordQuery, WordsApi};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.datamuse.com";

/// Spelling pattern used when a query has no starting letter. Datamuse
/// rejects lookups without a spelling or meaning constraint, and `topics`
/// only ranks results.
const UNCONSTRAINED_PATTERN: &str = "?????*";

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    #[serde(default)]
    word: String,
}

/// Client for the Datamuse `/words` endpoint.
///
/// Serves both the candidate word lists (`topics` + `sp` queries) and the
/// "means like" synonym lookups (`ml` queries).
pub struct DatamuseClient {
    http: reqwest::Client,
    base_url: String,
}

impl DatamuseClient {
    /// Creates a client against the public Datamuse API.
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_words(&self, params: &[(&str, String)]) -> Result<Vec<String>> {
        let url = format!("{}/words", self.base_url);
        let words: Vec<DatamuseWord> = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .context("Datamuse request failed")?
            .error_for_status()
            .context("Datamuse returned an error status")?
            .json()
            .await
            .context("Datamuse returned a malformed payload")?;
        Ok(words.into_iter().map(|w| w.word).collect())
    }
}

/// Translates a [`WordQuery`] into Datamuse query parameters.
fn query_params(query: &WordQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("max", query.max.to_string())];
    if let Some(topic) = &query.topic {
        params.push(("topics", topic.clone()));
    }
    match query.starts_with {
        Some(letter) => params.push(("sp", format!("{}*", letter))),
        None => params.push(("sp", UNCONSTRAINED_PATTERN.to_string())),
    }
    params
}

#[async_trait]
impl WordsApi for DatamuseClient {
    async fn words(&self, query: &WordQuery) -> Result<Vec<String>> {
        self.get_words(&query_params(query)).await
    }

    async fn means_like(&self, word: &str, max: usize) -> Result<Vec<String>> {
        self.get_words(&[("ml", word.to_string()), ("max", max.to_string())])
            .await
    }
}
