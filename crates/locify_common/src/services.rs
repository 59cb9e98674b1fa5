//! Service abstractions for external capabilities.
//!
//! This module provides trait definitions for the external capabilities the
//! tracking core depends on. The core never touches ambient runtime state
//! (network status, geolocation hardware, the hosted backend) directly;
//! everything arrives through these seams so the logic can be exercised
//! headlessly in tests with deterministic fakes.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::{BackendError, LocationError, StoreError};
use crate::models::{Device, FixRequest, GeoFix, LocationUpdate, PendingLocationEntry};

/// The hosted backend-as-a-service holding device records.
///
/// `update_device_location` is an idempotent upsert-style write; calling it
/// twice with the same payload is harmless, which is what makes the
/// best-effort retry-next-cycle policy of the tracker safe.
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    /// Fetch all device records visible to this agent.
    async fn fetch_devices(&self) -> Result<Vec<Device>, BackendError>;

    /// Upsert the location fields of a single device.
    async fn update_device_location(
        &self,
        device_id: &str,
        update: &LocationUpdate,
    ) -> Result<(), BackendError>;
}

/// A source of single-shot position fixes.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the runtime has any geolocation capability at all.
    ///
    /// When this returns `false` the tracker skips the cycle silently
    /// instead of requesting a fix.
    fn is_available(&self) -> bool {
        true
    }

    /// Acquire one current position fix, honoring the request's
    /// accuracy hint and acquisition timeout.
    async fn current_position(&self, request: &FixRequest) -> Result<GeoFix, LocationError>;
}

/// Observed network connectivity of the agent.
///
/// The watch channel only wakes receivers when the flag actually changes,
/// so every `true` observed after an await is an offline-to-online
/// transition.
pub trait ConnectivityProbe: Send + Sync {
    /// Current best-known connectivity.
    fn is_online(&self) -> bool;

    /// Subscribe to connectivity transitions.
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// Durable FIFO queue of location samples captured while offline.
///
/// Implementations must survive a process restart; a purely in-memory
/// store defeats the purpose of the queue.
#[async_trait]
pub trait PendingLocationStore: Send + Sync {
    /// Append one entry. Concurrent appends must both persist.
    async fn save_pending_location(&self, entry: PendingLocationEntry) -> Result<(), StoreError>;

    /// All entries currently stored, in insertion order. Does not mutate.
    async fn get_pending_locations(&self) -> Result<Vec<PendingLocationEntry>, StoreError>;

    /// Remove all entries unconditionally.
    async fn clear_pending_locations(&self) -> Result<(), StoreError>;
}

/// Sink for user-visible notifications.
///
/// The sync agent is the only producer today; it reports successful flush
/// passes and nothing else.
pub trait UserNotifier: Send + Sync {
    fn notify(&self, message: &str);
}
