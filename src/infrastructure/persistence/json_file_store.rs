//! File-backed snapshot store.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::domain::entities::Snapshot;
use crate::domain::repositories::{SnapshotStore, StoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores the snapshot as one pretty-printed JSON document.
///
/// Saves write to a uniquely named temporary file next to the target, fsync
/// it and rename it over the target. Readers therefore observe either the
/// previous document or the new one. A missing or empty file reads as the
/// empty snapshot.
///
/// Verify-after-write compares the re-read document with the one just saved.
/// Under [`AccessPolicy::Unsynchronized`](crate::domain::access_gate::AccessPolicy::Unsynchronized)
/// another writer may replace the file in between, which fails a save that
/// did succeed; enable it together with the serialized policy.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    verify_writes: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            verify_writes: false,
        }
    }

    /// Re-read the document after every save and fail if it differs.
    pub fn with_verify_writes(mut self, verify_writes: bool) -> Self {
        self.verify_writes = verify_writes;
        self
    }

    /// Opens the store, creating the document with empty tables if needed.
    ///
    /// An existing document is parsed once so that a corrupt file is reported
    /// at startup rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory or file cannot be created, or
    /// the existing document is malformed.
    pub async fn open(path: impl Into<PathBuf>, verify_writes: bool) -> Result<Self, StoreError> {
        let store = Self::new(path).with_verify_writes(verify_writes);

        if let Some(parent) = store.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        if tokio::fs::try_exists(&store.path).await? {
            let snapshot = store.read_snapshot().await?;
            info!(
                path = %store.path.display(),
                users = snapshot.users_table.len(),
                links = snapshot.links_table.len(),
                "Opened data file"
            );
        } else {
            store.write_snapshot(&Snapshot::default()).await?;
            info!(path = %store.path.display(), "Created empty data file");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> Result<Snapshot, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Data file missing, using empty snapshot");
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Snapshot::default());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(snapshot)?;
        let temp_path = self.temp_path();

        if let Err(e) = Self::write_and_sync(&temp_path, &payload).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn write_and_sync(path: &Path, payload: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(payload).await?;
        file.sync_all().await
    }

    /// Temporary sibling of the data file, unique across every store in the
    /// process.
    fn temp_path(&self) -> PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());

        self.path
            .with_file_name(format!(
                ".{file_name}.{}.{suffix}.{counter}.tmp",
                std::process::id()
            ))
    }

    /// Fails with [`StoreError::VerificationFailed`] unless the document on
    /// disk equals `expected`.
    async fn verify_written(&self, expected: &Snapshot) -> Result<(), StoreError> {
        let written = self.read_snapshot().await?;
        if &written != expected {
            warn!(path = %self.path.display(), "Data file differs from the snapshot just saved");
            return Err(StoreError::VerificationFailed {
                path: self.path.display().to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        self.read_snapshot().await
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.write_snapshot(snapshot).await?;

        if self.verify_writes {
            self.verify_written(snapshot).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkRecord;

    fn snapshot_with_link(slug: &str) -> Snapshot {
        Snapshot {
            users_table: vec![],
            links_table: vec![LinkRecord::new(
                format!("id-{slug}"),
                "http://example.com".to_string(),
                slug.to_string(),
                None,
            )],
        }
    }

    #[test]
    fn test_temp_paths_differ_across_stores_on_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let first = JsonFileStore::new(&path);
        let second = JsonFileStore::new(&path);

        let a = first.temp_path();
        let b = second.temp_path();

        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(
            a.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(".db.json.")
        );
    }

    #[tokio::test]
    async fn test_verification_fails_when_file_was_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::new(&path).with_verify_writes(true);
        let ours = snapshot_with_link("ours1");

        store.write_snapshot(&ours).await.unwrap();
        JsonFileStore::new(&path)
            .write_snapshot(&snapshot_with_link("their"))
            .await
            .unwrap();

        let result = store.verify_written(&ours).await;

        assert!(matches!(
            result,
            Err(StoreError::VerificationFailed { ref path }) if path.ends_with("db.json")
        ));
    }

    #[tokio::test]
    async fn test_verification_passes_for_own_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("db.json")).with_verify_writes(true);
        let ours = snapshot_with_link("ours1");

        store.write_snapshot(&ours).await.unwrap();

        assert!(store.verify_written(&ours).await.is_ok());
    }
}
