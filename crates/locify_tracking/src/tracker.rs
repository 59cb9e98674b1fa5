//! Lost-mode tracker.
//!
//! A session-level state machine with two states: Idle (no lost devices,
//! no timer) and Active (a repeating timer armed). [`LostModeTracker::update_devices`]
//! drives the transitions from whatever feeds the device set — the agent's
//! poll loop in production, a test directly.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use locify_common::models::{Device, FixRequest, LocationUpdate, PendingLocationEntry};
use locify_common::services::{
    ConnectivityProbe, DeviceBackend, LocationProvider, PendingLocationStore,
};
use locify_config::TrackingConfig;

/// Timing knobs of the tracker.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Cadence of the repeating tracking timer.
    pub interval: Duration,
    /// Acquisition timeout for a single position fix.
    pub fix_timeout: Duration,
    pub high_accuracy: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            fix_timeout: Duration::from_secs(10),
            high_accuracy: true,
        }
    }
}

impl From<&TrackingConfig> for TrackerConfig {
    fn from(config: &TrackingConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            fix_timeout: Duration::from_millis(config.fix_timeout_ms),
            high_accuracy: config.high_accuracy,
        }
    }
}

/// Keeps backend location data fresh for every device currently flagged
/// as lost.
///
/// While Active, a cycle fires immediately and then on every interval
/// tick. Each cycle runs as its own spawned task, so a slow fix or send
/// never blocks the cadence; overlapping cycles are possible and
/// deliberately unguarded.
pub struct LostModeTracker {
    config: TrackerConfig,
    backend: Arc<dyn DeviceBackend>,
    provider: Arc<dyn LocationProvider>,
    probe: Arc<dyn ConnectivityProbe>,
    store: Arc<dyn PendingLocationStore>,
    /// Ids the running timer was armed with; `None` while Idle.
    armed_ids: Option<Vec<String>>,
    timer: Option<JoinHandle<()>>,
}

impl LostModeTracker {
    pub fn new(
        config: TrackerConfig,
        backend: Arc<dyn DeviceBackend>,
        provider: Arc<dyn LocationProvider>,
        probe: Arc<dyn ConnectivityProbe>,
        store: Arc<dyn PendingLocationStore>,
    ) -> Self {
        Self {
            config,
            backend,
            provider,
            probe,
            store,
            armed_ids: None,
            timer: None,
        }
    }

    /// Reconcile the tracking timer with the current device set.
    ///
    /// No lost devices cancels the timer. A changed lost set while at
    /// least one device remains lost tears the timer down and re-arms it,
    /// resetting the cadence phase — an accepted simplification. An
    /// unchanged lost set leaves the running timer alone.
    pub fn update_devices(&mut self, devices: &[Device]) {
        let lost: Vec<String> = devices
            .iter()
            .filter(|d| d.status.is_lost())
            .map(|d| d.id.clone())
            .collect();

        if lost.is_empty() {
            if self.armed_ids.is_some() {
                debug!("no lost devices remain, stopping tracking timer");
            }
            self.cancel_timer();
            return;
        }

        if self.armed_ids.as_deref() == Some(lost.as_slice()) {
            return;
        }

        self.cancel_timer();
        debug!(lost = lost.len(), "arming lost-mode tracking timer");
        self.arm(lost);
    }

    /// Whether the repeating timer is currently armed.
    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    fn arm(&mut self, lost_ids: Vec<String>) {
        let cycle = TrackingCycle {
            fix_request: FixRequest {
                high_accuracy: self.config.high_accuracy,
                timeout: self.config.fix_timeout,
            },
            lost_ids: lost_ids.clone(),
            backend: self.backend.clone(),
            provider: self.provider.clone(),
            probe: self.probe.clone(),
            store: self.store.clone(),
        };

        let interval = self.config.interval;
        let timer = tokio::spawn(async move {
            // The first tick of a tokio interval completes immediately,
            // giving the sample-on-arming behavior for free.
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                tokio::spawn(cycle.clone().run());
            }
        });

        self.armed_ids = Some(lost_ids);
        self.timer = Some(timer);
    }

    /// Stops future ticks synchronously. Cycles already in flight run to
    /// completion and their side effects still apply; cancelling them is a
    /// deliberate non-goal.
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.armed_ids = None;
    }
}

impl Drop for LostModeTracker {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// One tracking cycle: everything it needs, cloned out of the tracker so
/// the spawned task owns its state.
#[derive(Clone)]
struct TrackingCycle {
    fix_request: FixRequest,
    lost_ids: Vec<String>,
    backend: Arc<dyn DeviceBackend>,
    provider: Arc<dyn LocationProvider>,
    probe: Arc<dyn ConnectivityProbe>,
    store: Arc<dyn PendingLocationStore>,
}

impl TrackingCycle {
    async fn run(self) {
        if !self.provider.is_available() {
            return;
        }

        let fix = match self.provider.current_position(&self.fix_request).await {
            Ok(fix) => fix,
            Err(err) => {
                // Silent degradation: no entry queued, no user feedback.
                // The next scheduled cycle retries independently.
                debug!(%err, "skipping tracking cycle without a position fix");
                return;
            }
        };

        // One shared fix and capture time for every lost device in this
        // cycle; the sample describes where this tracking session is, not
        // device-specific telemetry.
        let timestamp = Utc::now().to_rfc3339();

        for device_id in &self.lost_ids {
            if self.probe.is_online() {
                let update = LocationUpdate {
                    lat: fix.lat,
                    lng: fix.lng,
                    last_seen: timestamp.clone(),
                };
                if let Err(err) = self.backend.update_device_location(device_id, &update).await {
                    // Best effort while online: the sample is dropped, not
                    // queued. The next cycle sends a fresh one.
                    warn!(%err, device_id = %device_id, "device location update failed");
                }
            } else {
                let entry = PendingLocationEntry {
                    device_id: device_id.clone(),
                    lat: fix.lat,
                    lng: fix.lng,
                    timestamp: timestamp.clone(),
                };
                if let Err(err) = self.store.save_pending_location(entry).await {
                    warn!(%err, device_id = %device_id, "failed to queue offline location sample");
                }
            }
        }
    }
}
