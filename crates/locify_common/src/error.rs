use thiserror::Error;

/// Errors returned by the hosted device backend.
///
/// Each variant maps a failure class of the REST collaborator; callers in
/// the tracking core treat all of them as non-fatal and log-and-continue.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The HTTP request could not be sent or completed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success status
    #[error("backend rejected request with status {status}")]
    Api { status: u16 },

    /// The backend answered, but the body could not be decoded
    #[error("failed to parse backend response: {0}")]
    Parse(String),

    /// Missing or invalid client configuration
    #[error("backend configuration error: {0}")]
    Config(String),
}

/// Errors from a [`crate::services::LocationProvider`].
#[derive(Error, Debug)]
pub enum LocationError {
    /// The runtime has no geolocation capability at all
    #[error("no geolocation capability available")]
    Unavailable,

    /// The fix did not arrive within the requested acquisition timeout
    #[error("timed out acquiring a position fix")]
    Timeout,

    /// Position access was denied by the user or platform
    #[error("position access denied")]
    PermissionDenied,

    /// Any other provider failure (hardware, transport, decoding)
    #[error("position provider error: {0}")]
    Provider(String),
}

/// Errors from the pending-location store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error accessing pending-location store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode pending locations: {0}")]
    Serde(#[from] serde_json::Error),
}
