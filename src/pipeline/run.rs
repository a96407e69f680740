// src/pipeline/run.rs

//! One fetch → extract → reconcile → publish → save cycle.

use chrono::Utc;

use crate::error::Result;
use crate::feed::{FeedMetadata, FeedPublisher};
use crate::models::{Config, Snapshot};
use crate::services::{ListingExtractor, SourceFetcher};
use crate::storage::SnapshotStore;

use super::reconcile::{RunOutcome, reconcile};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Records extracted from the listing page
    pub listed: usize,
    /// Records written to the feed (0 when unchanged)
    pub published: usize,
}

/// Run a single watch cycle.
///
/// Fetch and extraction failures abort before anything is written. On a
/// publish, the feed is written first and the full current listing is then
/// saved as the new snapshot; a failed save fails the run even though the
/// feed is already on disk.
pub async fn run_watch(
    config: &Config,
    fetcher: &dyn SourceFetcher,
    store: &dyn SnapshotStore,
    publisher: &dyn FeedPublisher,
) -> Result<RunReport> {
    let extractor = ListingExtractor::new(&config.source)?;

    log::info!("Fetching {}", config.source.url);
    let html = fetcher.fetch(&config.source.url).await?;
    let current = extractor.extract(&html, Utc::now())?;
    log::info!("Found {} directives on listing page", current.len());

    let previous = store.load().await;
    let outcome = reconcile(&current, &previous);

    let listed = current.len();
    if !outcome.publishes() {
        log::info!("No new directives. Feed not updated.");
        return Ok(RunReport {
            outcome,
            listed,
            published: 0,
        });
    }

    match &outcome {
        RunOutcome::FirstRun => {
            log::info!("First run: generating feed for all current directives.")
        }
        RunOutcome::Updated(delta) => {
            log::info!("{} new directive(s) found. Updating feed.", delta.len())
        }
        RunOutcome::Unchanged => {}
    }

    let publish_set = outcome
        .publish_set(&current, config.feed.max_items)
        .unwrap_or_default();
    let metadata = FeedMetadata::from_config(config);
    publisher.publish(&metadata, publish_set).await?;
    let published = publish_set.len();
    log::info!(
        "Feed written with {} item(s) to {}",
        published,
        config.feed.path.display()
    );

    store.save(&Snapshot::new(current)).await?;
    log::info!(
        "Snapshot of {} directives saved to {}",
        listed,
        config.state.path.display()
    );

    Ok(RunReport {
        outcome,
        listed,
        published,
    })
}
