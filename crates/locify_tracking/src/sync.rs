//! Offline sync agent.
//!
//! Opportunistically flushes the pending-location store to the backend:
//! once at startup, then on every offline-to-online transition of the
//! connectivity signal.

use std::sync::Arc;

use tracing::{debug, warn};

use locify_common::error::StoreError;
use locify_common::services::{
    ConnectivityProbe, DeviceBackend, PendingLocationStore, UserNotifier,
};

/// Flushes queued offline location samples to the backend.
pub struct OfflineSyncAgent {
    backend: Arc<dyn DeviceBackend>,
    store: Arc<dyn PendingLocationStore>,
    notifier: Arc<dyn UserNotifier>,
}

impl OfflineSyncAgent {
    pub fn new(
        backend: Arc<dyn DeviceBackend>,
        store: Arc<dyn PendingLocationStore>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self {
            backend,
            store,
            notifier,
        }
    }

    /// One sync pass. Returns the number of entries delivered.
    ///
    /// The store is cleared in full as soon as at least one entry lands;
    /// a mixed batch therefore loses its failed entries permanently. This
    /// mirrors the upstream behavior on purpose — see DESIGN.md before
    /// "fixing" it, since per-entry acknowledgment changes user-visible
    /// semantics.
    pub async fn sync_pending(&self) -> Result<usize, StoreError> {
        let pending = self.store.get_pending_locations().await?;
        if pending.is_empty() {
            return Ok(0);
        }

        debug!(count = pending.len(), "flushing pending location updates");

        let mut synced = 0usize;
        for entry in &pending {
            match self
                .backend
                .update_device_location(&entry.device_id, &entry.as_update())
                .await
            {
                Ok(()) => synced += 1,
                Err(err) => {
                    // Counted as a non-success; the pass keeps going.
                    warn!(%err, device_id = %entry.device_id, "pending location update failed");
                }
            }
        }

        if synced > 0 {
            self.store.clear_pending_locations().await?;
            self.notifier.notify(&format!(
                "Synced {} offline location update{}",
                synced,
                if synced == 1 { "" } else { "s" }
            ));
        }

        Ok(synced)
    }

    /// Run the startup flush, then flush again every time connectivity
    /// comes back. Completes only if the probe side of the channel goes
    /// away.
    pub async fn run(&self, probe: Arc<dyn ConnectivityProbe>) {
        if let Err(err) = self.sync_pending().await {
            warn!(%err, "startup sync pass failed");
        }

        let mut online = probe.subscribe();
        loop {
            if online.changed().await.is_err() {
                // Probe dropped; nothing left to react to.
                return;
            }
            if *online.borrow_and_update() {
                if let Err(err) = self.sync_pending().await {
                    warn!(%err, "sync pass failed after reconnect");
                }
            }
        }
    }
}
