//! File-backed pending-location store.
//!
//! A JSON array in a single file on disk. The file is the whole contract:
//! it survives a process restart, which is the one hard requirement — the
//! queue exists to bridge the gap between an offline write and the next
//! online sync pass, and that gap may span a restart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use locify_common::error::StoreError;
use locify_common::models::PendingLocationEntry;
use locify_common::services::PendingLocationStore;

/// Durable FIFO queue of [`PendingLocationEntry`] records backed by a
/// JSON file.
///
/// Writes are serialized through an internal async mutex so concurrent
/// appends both persist, and each write goes to a sibling temp file that
/// is renamed into place, so an entry is never partially written.
pub struct FilePendingStore {
    path: PathBuf,
    // Serializes read-modify-write cycles. Readers take a plain snapshot
    // and may race an in-progress append; at worst a fresh entry is picked
    // up on the next sync pass, never lost.
    write_lock: Mutex<()>,
}

impl FilePendingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<PendingLocationEntry>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_entries(&self, entries: &[PendingLocationEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PendingLocationStore for FilePendingStore {
    async fn save_pending_location(&self, entry: PendingLocationEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.push(entry);
        self.write_entries(&entries).await?;
        debug!(total = entries.len(), "queued offline location sample");
        Ok(())
    }

    async fn get_pending_locations(&self) -> Result<Vec<PendingLocationEntry>, StoreError> {
        self.read_entries().await
    }

    async fn clear_pending_locations(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(device_id: &str, lat: f64) -> PendingLocationEntry {
        PendingLocationEntry {
            device_id: device_id.to_string(),
            lat,
            lng: -lat,
            timestamp: "2026-08-20T10:15:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePendingStore::new(dir.path().join("pending.json"));
        assert!(store.get_pending_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appends_preserve_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePendingStore::new(dir.path().join("pending.json"));

        store.save_pending_location(entry("d1", 1.0)).await.unwrap();
        store.save_pending_location(entry("d2", 2.0)).await.unwrap();
        store.save_pending_location(entry("d1", 3.0)).await.unwrap();

        let entries = store.get_pending_locations().await.unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.device_id.as_str()).collect();
        assert_eq!(ids, ["d1", "d2", "d1"]);
        assert_eq!(entries[2].lat, 3.0);
    }

    #[tokio::test]
    async fn concurrent_saves_both_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePendingStore::new(dir.path().join("pending.json"));

        let (a, b) = tokio::join!(
            store.save_pending_location(entry("d1", 1.0)),
            store.save_pending_location(entry("d2", 2.0)),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(store.get_pending_locations().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn entries_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending.json");

        {
            let store = FilePendingStore::new(&path);
            store.save_pending_location(entry("d1", 1.0)).await.unwrap();
        }

        // Fresh instance over the same path simulates a process restart.
        let reopened = FilePendingStore::new(&path);
        let entries = reopened.get_pending_locations().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].device_id, "d1");
    }

    #[tokio::test]
    async fn clear_removes_everything_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePendingStore::new(dir.path().join("pending.json"));

        store.save_pending_location(entry("d1", 1.0)).await.unwrap();
        store.clear_pending_locations().await.unwrap();
        assert!(store.get_pending_locations().await.unwrap().is_empty());

        // Clearing an already-empty store is not an error.
        store.clear_pending_locations().await.unwrap();
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePendingStore::new(dir.path().join("state/queue/pending.json"));
        store.save_pending_location(entry("d1", 1.0)).await.unwrap();
        assert_eq!(store.get_pending_locations().await.unwrap().len(), 1);
    }
}
