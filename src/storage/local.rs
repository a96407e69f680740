//! Local filesystem snapshot store.
//!
//! Persists the snapshot as a single JSON array:
//!
//! ```text
//! [
//!   { "id": "…", "title": "…", "url": "…", "published": "2024-04-11T12:00:00Z" }
//! ]
//! ```

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Snapshot;
use crate::storage::SnapshotStore;
use crate::utils::fs::write_atomic;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalSnapshotStore {
    path: PathBuf,
}

impl LocalSnapshotStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the snapshot, returning None if the file doesn't exist.
    async fn try_load(&self) -> Result<Option<Snapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::state_load(&self.path, e)),
        };
        let snapshot =
            serde_json::from_slice(&bytes).map_err(|e| AppError::state_load(&self.path, e))?;
        Ok(Some(snapshot))
    }

    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        write_atomic(&self.path, &bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn load(&self) -> Snapshot {
        match self.try_load().await {
            Ok(Some(snapshot)) => {
                log::debug!(
                    "Loaded {} records from {}",
                    snapshot.len(),
                    self.path.display()
                );
                snapshot
            }
            Ok(None) => {
                log::info!("No snapshot found at {}", self.path.display());
                Snapshot::default()
            }
            Err(e) => {
                log::warn!("{}. Treating as empty snapshot.", e);
                Snapshot::default()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.write_snapshot(snapshot)
            .await
            .map_err(|e| AppError::state_save(&self.path, e))?;
        log::debug!(
            "Saved {} records to {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DirectiveRecord;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(vec![
            DirectiveRecord::new("BOD 23-01", "https://www.cisa.gov/directive/bod-23-01", None),
            DirectiveRecord::new("BOD 22-01", "https://www.cisa.gov/directive/bod-22-01", None),
        ])
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(tmp.path().join("state.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(tmp.path().join("docs/state.json"));

        store.save(&sample_snapshot()).await.unwrap();
        assert_eq!(store.load().await, sample_snapshot());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSnapshotStore::new(tmp.path().join("state.json"));

        store.save(&sample_snapshot()).await.unwrap();
        let smaller = Snapshot::new(vec![DirectiveRecord::new(
            "ED 24-01",
            "https://www.cisa.gov/directive/ed-24-01",
            None,
        )]);
        store.save(&smaller).await.unwrap();

        assert_eq!(store.load().await, smaller);
    }

    #[tokio::test]
    async fn test_load_malformed_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = LocalSnapshotStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, r#"{"id": "a", "title": "X", "url": "u1"}"#).unwrap();

        let store = LocalSnapshotStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_try_load_reports_state_load_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = LocalSnapshotStore::new(&path);
        assert!(matches!(
            store.try_load().await,
            Err(AppError::StateLoad { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_accepts_records_without_published() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, r#"[{"id": "a", "title": "X", "url": "u1"}]"#).unwrap();

        let store = LocalSnapshotStore::new(&path);
        let snapshot = store.load().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].id, "a");
    }

    #[tokio::test]
    async fn test_save_failure_is_state_save_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let store = LocalSnapshotStore::new(blocker.join("state.json"));
        let result = store.save(&sample_snapshot()).await;
        assert!(matches!(result, Err(AppError::StateSave { .. })));
    }
}
