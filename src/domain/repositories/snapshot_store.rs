//! Storage contract for the whole-document snapshot.

use crate::domain::entities::Snapshot;
use async_trait::async_trait;

/// Failures of the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document read back after a save did not match what was written.
    #[error("Write verification failed for {path}")]
    VerificationFailed { path: String },
}

/// Repository interface for the persisted `{users_table, links_table}` document.
///
/// There are no partial reads or writes: callers `load` the full snapshot,
/// mutate it in memory, and `save` it back.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileStore`] - JSON file on disk
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-memory fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns the current snapshot.
    ///
    /// Yields [`Snapshot::default`] when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be read or parsed.
    async fn load(&self) -> Result<Snapshot, StoreError>;

    /// Replaces the stored document with `snapshot`.
    ///
    /// A subsequent [`load`](Self::load) observes either the previous document
    /// or this one, never a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}
