//! Logging setup for the Locify agent.
//!
//! This module provides a standardized approach to logging across the
//! workspace. The agent binary calls [`init`] once at startup; library
//! crates just use the `tracing` macros.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
///
/// A `RUST_LOG` environment variable, when present, overrides the default
/// filter entirely.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific default log level.
pub fn init_with_level(level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // Use try_init to handle the case where a global default subscriber has
    // already been set (tests, embedding).
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
