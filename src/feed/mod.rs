//! Feed publishing.
//!
//! The pipeline hands a capped list of records plus channel metadata to a
//! `FeedPublisher`. The RSS 2.0 writer is the only implementation.

pub mod rss;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Config, DirectiveRecord};

pub use rss::RssPublisher;

/// Channel-level feed metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

impl FeedMetadata {
    /// Build metadata from configuration; the channel links to the source page.
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.feed.title.clone(),
            link: config.source.url.clone(),
            description: config.feed.description.clone(),
            language: config.feed.language.clone(),
        }
    }
}

/// Trait for feed output backends.
#[async_trait]
pub trait FeedPublisher: Send + Sync {
    /// Serialize `records` as a feed, fully replacing any previous document.
    async fn publish(&self, metadata: &FeedMetadata, records: &[DirectiveRecord]) -> Result<()>;
}
