// src/lib.rs

//! directive-watch library
//!
//! Polls the CISA directives listing, detects entries not seen in the last
//! persisted snapshot and publishes them as an RSS feed.

pub mod error;
pub mod feed;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
