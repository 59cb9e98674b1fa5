//! Typed configuration for the Locify agent.
//!
//! Configuration is layered: `config/default.toml` (optional), an
//! environment-specific file named by `RUN_ENV` (optional), then
//! `LOCIFY__*` environment variables with `__` as the section separator.
//! Secrets such as the backend API key are expected to arrive through the
//! environment, typically via a `.env` file in development.

mod models;

pub use config::ConfigError;
pub use models::*;

use config::{Config, Environment, File};
use tracing::debug;

/// Load the application configuration from files and environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    // Best effort; a missing .env file is not an error.
    let _ = dotenv::dotenv();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());
    debug!("loading configuration for environment '{}'", run_env);

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("LOCIFY").separator("__"))
        .build()?;

    config.try_deserialize()
}
