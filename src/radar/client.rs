use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::radar::RadarSource;

pub struct RadarClient {
    http_client: Client,
    catalog_url: String,
}

impl RadarClient {
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            catalog_url: config.radar_catalog_url.clone(),
        })
    }
}

#[async_trait]
impl RadarSource for RadarClient {
    async fn frame_timestamps(&self) -> AppResult<Vec<i64>> {
        let response = self
            .http_client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Radar request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Radar catalog HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse radar catalog: {e}")))
    }
}
