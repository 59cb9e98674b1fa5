use serde::{Deserialize, Serialize};

// --- Backend Config ---
// Holds the hosted backend's project URL. The API key is a secret and is
// normally supplied via LOCIFY__BACKEND__API_KEY rather than a file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub url: String,     // e.g. https://xyzcompany.supabase.co
    pub api_key: String, // Loaded via LOCIFY__BACKEND__API_KEY
}

// --- Tracking Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TrackingConfig {
    /// Cadence of the lost-mode tracking timer, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Acquisition timeout for a single position fix, in milliseconds.
    #[serde(default = "default_fix_timeout_ms")]
    pub fix_timeout_ms: u64,
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    /// How often the agent refreshes the device list from the backend.
    #[serde(default = "default_device_poll_secs")]
    pub device_poll_secs: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fix_timeout_ms: default_fix_timeout_ms(),
            high_accuracy: default_high_accuracy(),
            device_poll_secs: default_device_poll_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}
fn default_fix_timeout_ms() -> u64 {
    10_000
}
fn default_high_accuracy() -> bool {
    true
}
fn default_device_poll_secs() -> u64 {
    60
}

// --- Offline Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OfflineConfig {
    /// Path of the durable pending-location queue file.
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "locify-pending.json".to_string()
}

// --- Connectivity Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConnectivityConfig {
    /// URL probed to decide whether the agent is online. Any response at
    /// all counts as reachable.
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    #[serde(default = "default_probe_poll_secs")]
    pub poll_secs: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_url: default_probe_url(),
            poll_secs: default_probe_poll_secs(),
        }
    }
}

fn default_probe_url() -> String {
    "https://clients3.google.com/generate_204".to_string()
}
fn default_probe_poll_secs() -> u64 {
    30
}

// --- Location Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LocationConfig {
    /// JSON geolocation endpoint answering with `lat`/`lng` (aliases
    /// `latitude`/`longitude` are accepted).
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
        }
    }
}

fn default_provider_url() -> String {
    "https://ipapi.co/json/".to_string()
}

// --- Top-level Application Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub offline: OfflineConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub location: LocationConfig,
}
