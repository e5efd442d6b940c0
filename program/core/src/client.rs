//! Remote Document Clients
//!
//! Trait definitions and reqwest implementations for the two kinds of remote
//! documents the program reads:
//!
//! - the schedule export (JSON, fetched once per program mount)
//! - detail resources (markdown, fetched per overlay whenever the source changes)
//!
//! The traits let the view logic run against mocks in tests. Neither client
//! retries; failures are logged here and returned to the caller.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::schedule::ScheduleDocument;

/// Source of the conference schedule
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Human-readable name of the source (URL or mock name)
    fn name(&self) -> &str;

    /// Fetch and normalize the schedule document
    async fn fetch_schedule(&self) -> Result<ScheduleDocument, FetchError>;
}

/// Fetcher for long-form detail documents
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    /// Fetch `url` as plain text
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Build the shared HTTP client
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        // The body is still used; only a parse failure counts as an error.
        tracing::warn!(%url, %status, "non-success status, parsing body anyway");
    }

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

/// Schedule client for the pretalx JSON export
#[derive(Clone)]
pub struct HttpScheduleClient {
    url: String,
    http_client: reqwest::Client,
}

impl HttpScheduleClient {
    /// Create a client for `url` with its own HTTP client
    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self::with_client(url, build_http_client(timeout)?))
    }

    /// Create a client for `url` reusing an existing HTTP client
    pub fn with_client(url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http_client,
        }
    }

    /// The schedule endpoint
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleClient {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch_schedule(&self) -> Result<ScheduleDocument, FetchError> {
        tracing::debug!(url = %self.url, "fetching schedule");
        let result = match get_text(&self.http_client, &self.url).await {
            Ok(body) => ScheduleDocument::from_json(&body),
            Err(e) => Err(e),
        };
        match &result {
            Ok(doc) => tracing::debug!(days = doc.days.len(), "schedule fetched"),
            Err(e) => tracing::error!("Error fetching schedule: {}", e),
        }
        result
    }
}

/// Detail fetcher over plain HTTP
#[derive(Clone)]
pub struct HttpDetailFetcher {
    http_client: reqwest::Client,
}

impl HttpDetailFetcher {
    /// Create a fetcher with its own HTTP client
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self::with_client(build_http_client(timeout)?))
    }

    /// Create a fetcher reusing an existing HTTP client
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl DetailFetcher for HttpDetailFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let result = get_text(&self.http_client, url).await;
        if let Err(e) = &result {
            tracing::error!("Error fetching detail document: {}", e);
        }
        result
    }
}
