//! Remote content providers.
//!
//! Each provider is a narrow capability trait with one HTTP-backed
//! implementation. Callers treat any `Err` exactly like an empty answer, so
//! implementations return errors freely and never retry.

pub mod datamuse;
pub mod dictionary;
pub mod wikipedia;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

pub use datamuse::DatamuseClient;
pub use dictionary::FreeDictionaryClient;
pub use wikipedia::WikipediaClient;

const USER_AGENT: &str = concat!("vocab-mailer/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client. Every request made through it is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Filters for a word-list query. `None` fields are left unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordQuery {
    pub topic: Option<String>,
    pub starts_with: Option<char>,
    pub max: usize,
}

/// A word list and "similar meaning" provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WordsApi: Send + Sync {
    /// Returns the raw `word` fields of a filtered word-list query, in provider order.
    async fn words(&self, query: &WordQuery) -> Result<Vec<String>>;

    /// Returns words with a meaning similar to `word`, in provider ranking order.
    async fn means_like(&self, word: &str, max: usize) -> Result<Vec<String>>;
}

/// A page summary from an encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The provider's page classification, e.g. `"standard"` or `"disambiguation"`.
    pub kind: Option<String>,
    pub extract: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncyclopediaApi: Send + Sync {
    /// Returns the summary for a page title, or `None` when no such page exists.
    async fn summary(&self, title: &str) -> Result<Option<Summary>>;
}

/// One sense reported by a dictionary provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySense {
    pub definition: String,
    pub example: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    /// Returns every sense of `word`, primary sense first. Unknown words yield an empty list.
    async fn senses(&self, word: &str) -> Result<Vec<DictionarySense>>;
}

/// A one-shot local HTTP server answering a single request with a canned response.
#[cfg(test)]
pub(crate) async fn serve_once(status: &str, body: &str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}
