//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Listing page and HTTP settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Feed document settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Snapshot persistence settings
    #[serde(default)]
    pub state: StateConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    ///
    /// Any other read or parse failure is returned.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.source.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "source.url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.source.link_selector.trim().is_empty() {
            return Err(AppError::validation("source.link_selector is empty"));
        }
        scraper::Selector::parse(&self.source.link_selector).map_err(|e| {
            AppError::validation(format!(
                "source.link_selector '{}' is invalid: {e:?}",
                self.source.link_selector
            ))
        })?;
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if self.feed.max_items == 0 {
            return Err(AppError::validation("feed.max_items must be > 0"));
        }
        if self.feed.title.trim().is_empty() {
            return Err(AppError::validation("feed.title is empty"));
        }
        if self.feed.path == self.state.path {
            return Err(AppError::validation(
                "feed.path and state.path must be different files",
            ));
        }
        Ok(())
    }
}

/// Listing page and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the directives listing page
    #[serde(default = "defaults::url")]
    pub url: String,

    /// CSS selector matching one anchor per directive
    #[serde(default = "defaults::link_selector")]
    pub link_selector: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: defaults::url(),
            link_selector: defaults::link_selector(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Feed document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Output path of the RSS document
    #[serde(default = "defaults::feed_path")]
    pub path: PathBuf,

    /// Channel title
    #[serde(default = "defaults::feed_title")]
    pub title: String,

    /// Channel description
    #[serde(default = "defaults::feed_description")]
    pub description: String,

    /// Channel language code
    #[serde(default = "defaults::feed_language")]
    pub language: String,

    /// Maximum number of items per published feed
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: defaults::feed_path(),
            title: defaults::feed_title(),
            description: defaults::feed_description(),
            language: defaults::feed_language(),
            max_items: defaults::max_items(),
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the JSON snapshot file
    #[serde(default = "defaults::state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: defaults::state_path(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Source defaults
    pub fn url() -> String {
        "https://www.cisa.gov/directives".into()
    }
    pub fn link_selector() -> String {
        "a[href*='/directive/']".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; directive-watch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Feed defaults
    pub fn feed_path() -> PathBuf {
        PathBuf::from("docs/rss.xml")
    }
    pub fn feed_title() -> String {
        "CISA Directives (New Only)".into()
    }
    pub fn feed_description() -> String {
        "Latest CISA Directive(s) only".into()
    }
    pub fn feed_language() -> String {
        "en".into()
    }
    pub fn max_items() -> usize {
        crate::pipeline::MAX_FEED_ITEMS
    }

    // State defaults
    pub fn state_path() -> PathBuf {
        PathBuf::from("docs/directives_state.json")
    }
}
