//! Locify agent entry point.
//!
//! Wires the production capability implementations to the tracking core:
//! loads configuration, starts the connectivity probe and the offline
//! sync agent, then drives the lost-mode tracker from a periodic device
//! list poll.

mod connectivity;
mod location;
mod notify;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use locify_common::logging;
use locify_common::services::{ConnectivityProbe, DeviceBackend};
use locify_config::load_config;
use locify_supabase::SupabaseClient;
use locify_tracking::store::FilePendingStore;
use locify_tracking::sync::OfflineSyncAgent;
use locify_tracking::tracker::{LostModeTracker, TrackerConfig};

#[tokio::main]
async fn main() {
    logging::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let backend: Arc<dyn DeviceBackend> = match SupabaseClient::new(&config.backend) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!(%err, "failed to build backend client");
            std::process::exit(1);
        }
    };

    let probe: Arc<dyn ConnectivityProbe> =
        match connectivity::HttpConnectivityProbe::spawn(&config.connectivity) {
            Ok(probe) => Arc::new(probe),
            Err(err) => {
                error!(%err, "failed to start connectivity probe");
                std::process::exit(1);
            }
        };

    let store = Arc::new(FilePendingStore::new(&config.offline.store_path));
    let provider = Arc::new(location::HttpLocationProvider::new(&config.location));
    let notifier = Arc::new(notify::LogNotifier);

    // Startup flush plus a flush on every reconnect, for the whole
    // process lifetime.
    let sync_agent = OfflineSyncAgent::new(backend.clone(), store.clone(), notifier);
    {
        let probe = probe.clone();
        tokio::spawn(async move { sync_agent.run(probe).await });
    }

    let mut tracker = LostModeTracker::new(
        TrackerConfig::from(&config.tracking),
        backend.clone(),
        provider,
        probe,
        store,
    );

    info!(
        store = %config.offline.store_path,
        "locify agent started"
    );

    // Poll-based stand-in for the backend's realtime push: refresh the
    // device list and let the tracker reconcile its timer.
    let mut poll = tokio::time::interval(Duration::from_secs(config.tracking.device_poll_secs));
    loop {
        poll.tick().await;
        match backend.fetch_devices().await {
            Ok(devices) => tracker.update_devices(&devices),
            Err(err) => warn!(%err, "device list refresh failed"),
        }
    }
}
