use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Durations, in hours, the UI may select.
pub const ALLOWED_WINDOW_HOURS: [u32; 5] = [24, 48, 72, 120, 168];

/// Duration used when the UI does not pick one.
pub const DEFAULT_WINDOW_HOURS: u32 = 168;

/// Wire format of window bounds: local time, no zone suffix.
const BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Aggregation window ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub hours: u32,
}

impl TimeWindow {
    /// Window of `hours` ending at `end`. Returns `None` for durations
    /// outside [`ALLOWED_WINDOW_HOURS`].
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, hours: u32) -> Option<Self> {
        if !ALLOWED_WINDOW_HOURS.contains(&hours) {
            return None;
        }
        Some(Self {
            start: end - Duration::hours(i64::from(hours)),
            end,
            hours,
        })
    }

    #[must_use]
    pub fn default_ending_at(end: DateTime<Utc>) -> Self {
        Self {
            start: end - Duration::hours(i64::from(DEFAULT_WINDOW_HOURS)),
            end,
            hours: DEFAULT_WINDOW_HOURS,
        }
    }

    /// Start and end formatted for the telemetry provider, shifted to the
    /// provider's wall clock.
    #[must_use]
    pub fn provider_bounds(&self, utc_offset_minutes: i32) -> (String, String) {
        let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        (
            self.start.with_timezone(&offset).format(BOUND_FORMAT).to_string(),
            self.end.with_timezone(&offset).format(BOUND_FORMAT).to_string(),
        )
    }
}
