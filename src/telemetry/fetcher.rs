use std::collections::HashSet;
use std::sync::Arc;

use crate::aggregation::TimeWindow;
use crate::telemetry::{Reading, TelemetrySource};

/// Fail-soft wrapper around a [`TelemetrySource`].
///
/// Every failure collapses into an empty batch so that one station can never
/// abort an aggregation cycle. Stations on the exclusion list never reach the
/// provider and always come back empty.
#[derive(Clone)]
pub struct TelemetryFetcher {
    source: Arc<dyn TelemetrySource>,
    excluded: Arc<HashSet<String>>,
}

impl TelemetryFetcher {
    pub fn new(source: Arc<dyn TelemetrySource>, excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            source,
            excluded: Arc::new(excluded.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn source(&self) -> &Arc<dyn TelemetrySource> {
        &self.source
    }

    #[must_use]
    pub fn is_excluded(&self, code: &str) -> bool {
        self.excluded.contains(code)
    }

    pub async fn fetch(&self, code: &str, window: &TimeWindow) -> Vec<Reading> {
        if self.is_excluded(code) {
            tracing::debug!(station = %code, "Station excluded, skipping telemetry");
            return Vec::new();
        }

        match self.source.station_readings(code, window).await {
            Ok(readings) => {
                if readings.is_empty() {
                    tracing::debug!(station = %code, "Empty telemetry payload");
                }
                readings
            }
            Err(e) => {
                tracing::warn!(station = %code, error = %e, "Telemetry fetch failed");
                Vec::new()
            }
        }
    }
}
