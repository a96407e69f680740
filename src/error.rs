// src/error.rs

//! Unified error handling for the directive watcher.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Every variant except `StateLoad` is fatal to a run. `StateLoad` is raised
/// by the snapshot store internally and degraded to an empty snapshot.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network failure or non-success HTTP status
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Listing page did not contain the expected structure
    #[error("Extract error: {0}")]
    Extract(String),

    /// Persisted snapshot could not be read or parsed
    #[error("State load error at {path}: {message}")]
    StateLoad { path: String, message: String },

    /// Snapshot could not be persisted
    #[error("State save error at {path}: {message}")]
    StateSave { path: String, message: String },

    /// Feed document could not be rendered or written
    #[error("Feed error at {path}: {message}")]
    Feed { path: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration value failed validation
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error for the given URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error.
    pub fn extract(message: impl Into<String>) -> Self {
        Self::Extract(message.into())
    }

    /// Create an extraction error for a selector that failed to parse.
    pub fn selector(selector: &str, message: impl fmt::Display) -> Self {
        Self::Extract(format!("invalid selector '{selector}': {message}"))
    }

    /// Create a state load error.
    pub fn state_load(path: &Path, message: impl fmt::Display) -> Self {
        Self::StateLoad {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a state save error.
    pub fn state_save(path: &Path, message: impl fmt::Display) -> Self {
        Self::StateSave {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a feed error.
    pub fn feed(path: &Path, message: impl fmt::Display) -> Self {
        Self::Feed {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = AppError::fetch("https://example.com", "HTTP status 503");
        assert_eq!(
            err.to_string(),
            "Fetch error for https://example.com: HTTP status 503"
        );
    }

    #[test]
    fn test_selector_error_is_extract() {
        let err = AppError::selector("[[", "unexpected token");
        assert!(matches!(err, AppError::Extract(_)));
        assert!(err.to_string().contains("[["));
    }

    #[test]
    fn test_state_save_error_carries_path() {
        let err = AppError::state_save(Path::new("docs/state.json"), "permission denied");
        assert!(err.to_string().contains("docs/state.json"));
    }
}
