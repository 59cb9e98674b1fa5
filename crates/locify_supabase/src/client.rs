//! HTTP client for the Supabase `devices` table.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use locify_common::error::BackendError;
use locify_common::models::{Device, LocationUpdate};
use locify_common::services::DeviceBackend;
use locify_config::BackendConfig;

/// Client for the hosted backend's REST API.
///
/// Carries the project's `apikey` and bearer token as default headers so
/// every request is authenticated the same way.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
}

impl SupabaseClient {
    /// Build a client from the backend configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] when the API key cannot be used as
    /// an HTTP header value, and [`BackendError::Http`] when the
    /// underlying client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut headers = header::HeaderMap::new();

        let mut api_key = header::HeaderValue::from_str(&config.api_key).map_err(|_| {
            BackendError::Config("API key contains invalid header characters".to_string())
        })?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let mut bearer = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                BackendError::Config("API key contains invalid header characters".to_string())
            })?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| BackendError::Http(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn devices_url(&self) -> String {
        format!("{}/rest/v1/devices", self.base_url)
    }
}

#[async_trait]
impl DeviceBackend for SupabaseClient {
    async fn fetch_devices(&self) -> Result<Vec<Device>, BackendError> {
        let response = self
            .client
            .get(self.devices_url())
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|err| BackendError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
            });
        }

        let devices = response
            .json::<Vec<Device>>()
            .await
            .map_err(|err| BackendError::Parse(err.to_string()))?;
        debug!(count = devices.len(), "fetched device list");
        Ok(devices)
    }

    async fn update_device_location(
        &self,
        device_id: &str,
        update: &LocationUpdate,
    ) -> Result<(), BackendError> {
        let filter = format!("eq.{device_id}");
        let response = self
            .client
            .patch(self.devices_url())
            .query(&[("id", filter.as_str())])
            .json(update)
            .send()
            .await
            .map_err(|err| BackendError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
