//! Source fetcher service.
//!
//! Retrieves the raw listing page. No retries are attempted; a failure here
//! aborts the run before any state is touched.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::SourceConfig;
use crate::utils::http::{create_async_client, fetch_text};

/// Anything that can turn a URL into page text.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the raw page content at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP-backed fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let body = fetch_text(&self.client, url).await?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
