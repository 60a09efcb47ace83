//! In-memory snapshot store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::Snapshot;
use crate::domain::repositories::{SnapshotStore, StoreError};

/// Keeps the snapshot in process memory.
///
/// Behaves like [`super::JsonFileStore`]: `load` hands out an owned copy and
/// `save` replaces the whole value, so the same read-whole/write-whole races
/// apply.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkRecord;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await.unwrap(), Snapshot::default());
    }

    #[tokio::test]
    async fn test_save_replaces_whole_snapshot() {
        let store = MemoryStore::new();
        let mut snapshot = store.load().await.unwrap();
        snapshot.links_table.push(LinkRecord::new(
            "id".to_string(),
            "http://example.com".to_string(),
            "aB3xZ".to_string(),
            None,
        ));

        store.save(&snapshot).await.unwrap();

        assert_eq!(store.load().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_loaded_copy_is_detached() {
        let store = MemoryStore::new();
        let mut copy = store.load().await.unwrap();
        copy.links_table.push(LinkRecord::new(
            "id".to_string(),
            "http://example.com".to_string(),
            "aB3xZ".to_string(),
            None,
        ));

        assert!(store.load().await.unwrap().links_table.is_empty());
    }
}
