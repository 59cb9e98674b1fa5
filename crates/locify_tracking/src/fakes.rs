//! Deterministic in-memory fakes for the capability traits.
//!
//! These record every interaction so tests can assert exact call counts
//! and payloads without a runtime environment, and let a test script
//! connectivity flips, fix outcomes, and per-device backend failures.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use locify_common::error::{BackendError, LocationError, StoreError};
use locify_common::models::{
    Device, DeviceKind, DeviceStatus, FixRequest, GeoFix, LocationUpdate, PendingLocationEntry,
};
use locify_common::services::{
    ConnectivityProbe, DeviceBackend, LocationProvider, PendingLocationStore, UserNotifier,
};

pub fn device(id: &str, status: DeviceStatus) -> Device {
    Device {
        id: id.to_string(),
        name: format!("device {id}"),
        kind: DeviceKind::Phone,
        status,
        battery_level: 80,
        last_seen: chrono::Utc::now(),
        lat: 0.0,
        lng: 0.0,
        address: None,
        is_ringing: false,
        lost_message: None,
        is_wiped: false,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    /// Every update attempt, successful or not, in call order.
    pub updates: Mutex<Vec<(String, LocationUpdate)>>,
    /// Device ids whose updates fail.
    pub failing: Mutex<HashSet<String>>,
}

impl FakeBackend {
    pub fn fail_for(&self, device_id: &str) {
        self.failing.lock().unwrap().insert(device_id.to_string());
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl DeviceBackend for FakeBackend {
    async fn fetch_devices(&self) -> Result<Vec<Device>, BackendError> {
        Ok(Vec::new())
    }

    async fn update_device_location(
        &self,
        device_id: &str,
        update: &LocationUpdate,
    ) -> Result<(), BackendError> {
        self.updates
            .lock()
            .unwrap()
            .push((device_id.to_string(), update.clone()));
        if self.failing.lock().unwrap().contains(device_id) {
            return Err(BackendError::Http("connection reset".to_string()));
        }
        Ok(())
    }
}

pub struct FakeProvider {
    /// `Err` outcomes simulate timeouts or denied permission.
    pub fix: Mutex<Result<GeoFix, LocationError>>,
    pub available: bool,
    pub requests: Mutex<Vec<FixRequest>>,
}

impl FakeProvider {
    pub fn with_fix(lat: f64, lng: f64) -> Self {
        Self {
            fix: Mutex::new(Ok(GeoFix { lat, lng })),
            available: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fix: Mutex::new(Err(LocationError::Timeout)),
            available: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fix: Mutex::new(Err(LocationError::Unavailable)),
            available: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LocationProvider for FakeProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(&self, request: &FixRequest) -> Result<GeoFix, LocationError> {
        self.requests.lock().unwrap().push(*request);
        match &*self.fix.lock().unwrap() {
            Ok(fix) => Ok(*fix),
            Err(LocationError::Timeout) => Err(LocationError::Timeout),
            Err(LocationError::Unavailable) => Err(LocationError::Unavailable),
            Err(LocationError::PermissionDenied) => Err(LocationError::PermissionDenied),
            Err(LocationError::Provider(message)) => Err(LocationError::Provider(message.clone())),
        }
    }
}

pub struct FakeProbe {
    online: watch::Sender<bool>,
}

impl FakeProbe {
    pub fn new(online: bool) -> Self {
        Self {
            online: watch::channel(online).0,
        }
    }

    /// Flip connectivity; receivers only wake on an actual change, like
    /// the production probe.
    pub fn set_online(&self, online: bool) {
        self.online.send_if_modified(|current| {
            if *current != online {
                *current = online;
                true
            } else {
                false
            }
        });
    }
}

impl ConnectivityProbe for FakeProbe {
    fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.online.subscribe()
    }
}

/// In-memory store, for tests only; the durability requirement of the
/// real contract is covered by the `FilePendingStore` tests.
#[derive(Default)]
pub struct MemoryStore {
    pub entries: Mutex<Vec<PendingLocationEntry>>,
}

impl MemoryStore {
    pub fn with_entries(entries: Vec<PendingLocationEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl PendingLocationStore for MemoryStore {
    async fn save_pending_location(&self, entry: PendingLocationEntry) -> Result<(), StoreError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn get_pending_locations(&self) -> Result<Vec<PendingLocationEntry>, StoreError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn clear_pending_locations(&self) -> Result<(), StoreError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl UserNotifier for FakeNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
