//! Free Dictionary API client (dictionaryapi.dev).

use super::{DictionaryApi, DictionarySense};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<RawSense>,
}

#[derive(Debug, Deserialize)]
struct RawSense {
    #[serde(default)]
    definition: String,
    example: Option<String>,
}

/// Client for the Free Dictionary API. Unknown words (HTTP 404) yield no senses.
pub struct FreeDictionaryClient {
    http: reqwest::Client,
    base_url: String,
}

impl FreeDictionaryClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Flattens entries into senses, dropping blank definitions.
fn flatten(entries: Vec<Entry>) -> Vec<DictionarySense> {
    entries
        .into_iter()
        .flat_map(|e| e.meanings)
        .flat_map(|m| m.definitions)
        .filter(|s| !s.definition.trim().is_empty())
        .map(|s| DictionarySense {
            definition: s.definition.trim().to_string(),
            example: s
                .example
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        })
        .collect()
}

#[async_trait]
impl DictionaryApi for FreeDictionaryClient {
    async fn senses(&self, word: &str) -> Result<Vec<DictionarySense>> {
        let url = format!("{}/{}", self.base_url, word);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Dictionary request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let entries: Vec<Entry> = response
            .error_for_status()
            .context("Dictionary returned an error status")?
            .json()
            .await
            .context("Dictionary returned a malformed payload")?;
        Ok(flatten(entries))
    }
}
