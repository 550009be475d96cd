//! Alarm events shown in the alarms table and exported as CSV.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::telemetry::{AlarmRecord, TelemetrySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Classify from the free-text alarm message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("alto") || message.contains("high") {
            Self::High
        } else if message.contains("médio") || message.contains("medio") || message.contains("medium") {
            Self::Medium
        } else if message.contains("baixo") || message.contains("low") {
            Self::Low
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AlarmEvent {
    pub station: String,
    pub time: String,
    pub value: String,
    pub message: String,
    pub severity: Severity,
}

impl From<AlarmRecord> for AlarmEvent {
    fn from(record: AlarmRecord) -> Self {
        let value = record.value_text();
        let severity = Severity::classify(&record.message);
        Self {
            station: record.station,
            time: record.time,
            value,
            message: record.message,
            severity,
        }
    }
}

/// Current alarm events. Provider failures yield an empty table.
pub async fn fetch_alarms(source: &dyn TelemetrySource) -> Vec<AlarmEvent> {
    match source.alarm_records().await {
        Ok(records) => records.into_iter().map(AlarmEvent::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Alarm fetch failed");
            Vec::new()
        }
    }
}

/// Render events as CSV with a header row.
///
/// # Errors
///
/// Returns `AppError::Internal` if the CSV writer fails.
pub fn to_csv(events: &[AlarmEvent]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["station", "time", "value", "message", "severity"])
        .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;

    for event in events {
        writer
            .write_record([
                event.station.as_str(),
                event.time.as_str(),
                event.value.as_str(),
                event.message.as_str(),
                event.severity.as_str(),
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV flush failed: {e}")))
}
