use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::radar::RadarSource;

/// Overlay opacity when the UI does not provide one.
pub const DEFAULT_OPACITY: f64 = 0.5;

/// One radar snapshot, addressable through a tile-URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RadarFrame {
    /// Epoch seconds
    pub timestamp: i64,
    /// Template with `{z}`, `{x}` and `{y}` placeholders
    pub tile_url: String,
}

impl RadarFrame {
    #[must_use]
    pub fn new(tile_base_url: &str, timestamp: i64) -> Self {
        Self {
            timestamp,
            tile_url: format!("{tile_base_url}{timestamp}/256/{{z}}/{{x}}/{{y}}/2/1_1.png"),
        }
    }

    /// Concrete URL of one tile.
    #[must_use]
    pub fn tile(&self, z: u32, x: u32, y: u32) -> String {
        self.tile_url
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Builds the frame sequence from the provider's timestamps.
#[derive(Debug, Clone)]
pub struct FrameCatalog {
    tile_base_url: String,
    lookback: Duration,
}

impl FrameCatalog {
    #[must_use]
    pub fn new(tile_base_url: impl Into<String>, lookback_minutes: i64) -> Self {
        Self {
            tile_base_url: tile_base_url.into(),
            lookback: Duration::minutes(lookback_minutes),
        }
    }

    /// Frames no older than the look-back window, ascending and without
    /// duplicates.
    #[must_use]
    pub fn build(&self, timestamps: &[i64], now: DateTime<Utc>) -> Vec<RadarFrame> {
        let cutoff = (now - self.lookback).timestamp();

        let mut recent: Vec<i64> = timestamps.iter().copied().filter(|ts| *ts >= cutoff).collect();
        recent.sort_unstable();
        recent.dedup();

        recent
            .into_iter()
            .map(|ts| RadarFrame::new(&self.tile_base_url, ts))
            .collect()
    }

    /// Fetch and build the catalog. Provider failures yield an empty catalog.
    pub async fn fetch(&self, source: &dyn RadarSource, now: DateTime<Utc>) -> Vec<RadarFrame> {
        match source.frame_timestamps().await {
            Ok(timestamps) => {
                let frames = self.build(&timestamps, now);
                tracing::debug!(
                    available = timestamps.len(),
                    frames = frames.len(),
                    "Radar catalog built"
                );
                frames
            }
            Err(e) => {
                tracing::warn!(error = %e, "Radar catalog fetch failed");
                Vec::new()
            }
        }
    }
}

/// What the map draws on top of the base layer.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RadarOverlay {
    pub timestamp: i64,
    pub tile_url: String,
    pub opacity: f64,
}

impl RadarOverlay {
    /// Opacity is clamped to `[0, 1]`; a missing or non-finite value falls
    /// back to [`DEFAULT_OPACITY`].
    #[must_use]
    pub fn new(frame: &RadarFrame, opacity: Option<f64>) -> Self {
        let opacity = opacity
            .filter(|o| o.is_finite())
            .map_or(DEFAULT_OPACITY, |o| o.clamp(0.0, 1.0));
        Self {
            timestamp: frame.timestamp,
            tile_url: frame.tile_url.clone(),
            opacity,
        }
    }
}
