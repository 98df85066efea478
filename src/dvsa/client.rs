//! HTTP client for the DVSA MOT history API.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::error::DvsaError;
use super::types::VehicleHistory;

/// Anything that can look up a vehicle's MOT history by registration.
/// Implemented by [`VehicleHistoryClient`]; tests substitute canned
/// implementations.
#[allow(async_fn_in_trait)]
pub trait VehicleLookup {
    async fn fetch(&self, registration: &str, token: &str) -> Result<VehicleHistory, DvsaError>;
}

/// Client for `GET <base>/<registration>` on the MOT history API.
pub struct VehicleHistoryClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl VehicleHistoryClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

impl VehicleLookup for VehicleHistoryClient {
    async fn fetch(&self, registration: &str, token: &str) -> Result<VehicleHistory, DvsaError> {
        let url = format!("{}/{registration}", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DvsaError::NotFound);
        }
        if !status.is_success() {
            return Err(DvsaError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<VehicleHistory>().await?)
    }
}
