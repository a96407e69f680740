//! Storage abstractions for snapshot persistence.
//!
//! The snapshot is the full listing seen at the last publish. It is read
//! once at the start of a run and replaced wholesale after a publish.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Snapshot;

// Re-export for convenience
pub use local::LocalSnapshotStore;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the last persisted snapshot.
    ///
    /// A missing or unreadable snapshot is not an error: implementations log
    /// it and return an empty snapshot, which reconciles as a first run.
    async fn load(&self) -> Snapshot;

    /// Replace the persisted snapshot atomically.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
