//! Wikipedia REST page-summary client.

use super::{EncyclopediaApi, Summary};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type")]
    kind: Option<String>,
    extract: Option<String>,
}

/// Client for the Wikipedia REST `page/summary` endpoint.
///
/// A missing page (HTTP 404) is reported as `Ok(None)` rather than an error.
pub struct WikipediaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WikipediaClient {
    pub fn new(http: reqwest::Client) -> Result<Self> {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates a client against another summary endpoint, e.g. a local mirror.
    ///
    /// # Arguments
    ///
    /// * `http` - The shared HTTP client carrying the request timeout.
    /// * `base_url` - URL that page titles are appended to as a path segment.
    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid Wikipedia base URL")?;
        Ok(Self { http, base_url })
    }

    fn page_url(&self, title: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Wikipedia base URL cannot carry a path"))?
            .pop_if_empty()
            .push(title);
        Ok(url)
    }
}

#[async_trait]
impl EncyclopediaApi for WikipediaClient {
    async fn summary(&self, title: &str) -> Result<Option<Summary>> {
        let response = self
            .http
            .get(self.page_url(title)?)
            .send()
            .await
            .context("Wikipedia request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let page: PageSummary = response
            .error_for_status()
            .context("Wikipedia returned an error status")?
            .json()
            .await
            .context("Wikipedia returned a malformed payload")?;

        Ok(page.extract.map(|extract| Summary {
            kind: page.kind,
            extract,
        }))
    }
}
