//! HTTP-based location provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use locify_common::error::LocationError;
use locify_common::models::{FixRequest, GeoFix};
use locify_common::services::LocationProvider;
use locify_config::LocationConfig;

/// Resolves the agent's position from a JSON geolocation endpoint.
///
/// Headless agents have no GPS hardware to ask, so the production
/// provider falls back to network geolocation. The endpoint answers with
/// `lat`/`lng` (or `latitude`/`longitude`); the fix request's
/// `high_accuracy` hint has no effect here, there is only one accuracy.
pub struct HttpLocationProvider {
    client: Client,
    url: String,
}

impl HttpLocationProvider {
    pub fn new(config: &LocationConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.provider_url.clone(),
        }
    }
}

#[derive(Deserialize)]
struct PositionBody {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lng: f64,
}

#[async_trait]
impl LocationProvider for HttpLocationProvider {
    async fn current_position(&self, request: &FixRequest) -> Result<GeoFix, LocationError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::Provider(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Provider(format!(
                "geolocation endpoint returned {status}"
            )));
        }

        let body: PositionBody = response
            .json()
            .await
            .map_err(|err| LocationError::Provider(err.to_string()))?;

        Ok(GeoFix {
            lat: body.lat,
            lng: body.lng,
        })
    }
}
