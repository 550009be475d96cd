use std::cmp::Reverse;

use crate::aggregation::{AggregationPolicy, ParameterType};
use crate::telemetry::Reading;

/// Reduce a batch to one display value for `parameter`.
///
/// Accumulated rain sums over the window; every other metric reports the
/// latest sample. Results are clamped at zero except for temperature.
#[must_use]
pub fn aggregate(parameter: ParameterType, readings: &[Reading], field: &str) -> f64 {
    let value = match parameter.policy() {
        AggregationPolicy::SumOverWindow => sum_over_window(readings, field),
        AggregationPolicy::LatestByTimestamp => latest_by_timestamp(readings, field),
    };

    if parameter.clamps_negative() {
        value.max(0.0)
    } else {
        value
    }
}

/// Sum of the non-negative numeric values of `field`. Empty input is 0.
#[must_use]
pub fn sum_over_window(readings: &[Reading], field: &str) -> f64 {
    readings
        .iter()
        .filter_map(|r| r.numeric(field))
        .filter(|v| *v >= 0.0)
        .sum()
}

/// Most recent numeric value of `field`.
///
/// Readings with a timestamp win over readings without one; when no reading
/// is dated the first valid value in input order is used. Equal timestamps
/// resolve to the earlier reading. Empty or all-invalid input is 0.
#[must_use]
pub fn latest_by_timestamp(readings: &[Reading], field: &str) -> f64 {
    let valid: Vec<(Option<chrono::NaiveDateTime>, f64)> = readings
        .iter()
        .filter_map(|r| r.numeric(field).map(|v| (r.timestamp, v)))
        .collect();

    valid
        .iter()
        .filter_map(|(ts, v)| ts.map(|ts| (ts, *v)))
        .min_by_key(|(ts, _)| Reverse(*ts))
        .map(|(_, v)| v)
        .or_else(|| valid.first().map(|(_, v)| *v))
        .unwrap_or(0.0)
}
