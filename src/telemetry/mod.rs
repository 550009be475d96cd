pub mod client;
pub mod fetcher;
pub mod models;

use async_trait::async_trait;

use crate::aggregation::TimeWindow;
use crate::error::AppResult;

pub use client::TelemetryClient;
pub use fetcher::TelemetryFetcher;
pub use models::{AlarmRecord, Reading, Station, StationMetrics};

/// Station telemetry provider.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Every known station, in directory order.
    async fn station_directory(&self) -> AppResult<Vec<Station>>;

    /// Raw readings for one station within `window`.
    async fn station_readings(&self, code: &str, window: &TimeWindow) -> AppResult<Vec<Reading>>;

    /// Recent alarm rows.
    async fn alarm_records(&self) -> AppResult<Vec<AlarmRecord>>;
}
