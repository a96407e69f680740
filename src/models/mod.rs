// src/models/mod.rs

//! Domain models for the directive watcher.

mod config;
mod directive;

// Re-export all public types
pub use config::{Config, FeedConfig, SourceConfig, StateConfig};
pub use directive::{DirectiveRecord, Snapshot, parse_timestamp};
