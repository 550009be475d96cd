use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::aggregation::TimeWindow;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::telemetry::TelemetrySource;
use crate::telemetry::models::{AlarmRecord, DirectoryEntry, Reading, Station};

pub struct TelemetryClient {
    http_client: Client,
    base_url: Url,
    bearer_token: Option<String>,
    utc_offset_minutes: i32,
}

impl TelemetryClient {
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the HTTP client cannot be built or
    /// the base URL cannot carry path segments.
    pub fn new(config: &Config) -> AppResult<Self> {
        let base_url = Url::parse(&config.telemetry_base_url)
            .map_err(|e| AppError::Internal(format!("Invalid telemetry base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Internal(format!(
                "Telemetry base URL cannot carry a path: {base_url}"
            )));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            bearer_token: config.telemetry_bearer_token.clone(),
            utc_offset_minutes: config.telemetry_utc_offset_minutes,
        })
    }

    /// Base URL extended with `segments`, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!("Base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> AppResult<T> {
        let mut request = self.http_client.get(url.clone()).query(query);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::Upstream("Rate limited (429)".to_string()));
        }

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to get response text: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                %url,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse telemetry response"
            );
            AppError::Upstream(format!("Failed to parse response: {e}"))
        })
    }
}

/// Turn the directory mapping into stations, keeping the provider's order.
/// Malformed entries are skipped.
#[must_use]
pub fn parse_directory(directory: serde_json::Map<String, Value>) -> Vec<Station> {
    directory
        .into_iter()
        .filter_map(|(code, raw)| match serde_json::from_value::<DirectoryEntry>(raw) {
            Ok(entry) => Some(Station::from_directory(code, entry)),
            Err(e) => {
                tracing::warn!(station = %code, error = %e, "Skipping malformed directory entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl TelemetrySource for TelemetryClient {
    async fn station_directory(&self) -> AppResult<Vec<Station>> {
        let url = self.endpoint(&["stations"])?;
        let directory: serde_json::Map<String, Value> = self.get_json(url, &[]).await?;
        Ok(parse_directory(directory))
    }

    async fn station_readings(&self, code: &str, window: &TimeWindow) -> AppResult<Vec<Reading>> {
        let (start, end) = window.provider_bounds(self.utc_offset_minutes);
        let url = self.endpoint(&["stations", code, "readings"])?;

        let samples: Vec<Value> = self
            .get_json(url, &[("start", start.as_str()), ("end", end.as_str())])
            .await?;
        Ok(samples.into_iter().filter_map(Reading::from_value).collect())
    }

    async fn alarm_records(&self) -> AppResult<Vec<AlarmRecord>> {
        let url = self.endpoint(&["alarms"])?;
        self.get_json(url, &[]).await
    }
}
