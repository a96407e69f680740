//! Pipeline entry points.
//!
//! - `reconcile`: Classify a run against the previous snapshot (pure)
//! - `run_watch`: Fetch, reconcile, publish and persist in one pass

pub mod reconcile;
pub mod run;

pub use reconcile::{MAX_FEED_ITEMS, RunOutcome, reconcile};
pub use run::{RunReport, run_watch};
