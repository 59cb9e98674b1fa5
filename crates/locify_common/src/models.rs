//! Data models shared across the Locify crates.
//!
//! Field names on [`Device`] match the backend's `devices` rows so the
//! structs deserialize straight from the REST responses.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a registered device.
///
/// Only `lost` devices participate in elevated-frequency tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Lost,
}

impl DeviceStatus {
    pub fn is_lost(&self) -> bool {
        matches!(self, DeviceStatus::Lost)
    }
}

/// The kind of hardware a device record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Phone,
    Tablet,
    Laptop,
    Watch,
}

/// A registered device as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub battery_level: i32,
    pub last_seen: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_ringing: bool,
    #[serde(default)]
    pub lost_message: Option<String>,
    #[serde(default)]
    pub is_wiped: bool,
}

/// A single position fix returned by a location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub lat: f64,
    pub lng: f64,
}

/// Parameters for a single position-fix request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixRequest {
    pub high_accuracy: bool,
    /// How long the provider may spend acquiring the fix before giving up.
    pub timeout: Duration,
}

impl Default for FixRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Payload of a device location update sent to the backend.
///
/// `last_seen` is an ISO-8601 string captured at fix time, not at send
/// time, so queued offline samples keep their original capture moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub lat: f64,
    pub lng: f64,
    pub last_seen: String,
}

/// One location sample captured while the network was unavailable,
/// waiting in the pending store to be flushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingLocationEntry {
    pub device_id: String,
    pub lat: f64,
    pub lng: f64,
    /// ISO-8601 capture time of the sample.
    pub timestamp: String,
}

impl PendingLocationEntry {
    /// The backend update this entry resolves to when flushed.
    pub fn as_update(&self) -> LocationUpdate {
        LocationUpdate {
            lat: self.lat,
            lng: self.lng,
            last_seen: self.timestamp.clone(),
        }
    }
}
