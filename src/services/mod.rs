//! Service layer for the directive watcher.
//!
//! - Page fetching (`SourceFetcher`, `HttpFetcher`)
//! - Listing extraction (`ListingExtractor`)

mod extractor;
mod fetcher;

pub use extractor::ListingExtractor;
pub use fetcher::{HttpFetcher, SourceFetcher};
