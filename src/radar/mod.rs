pub mod catalog;
pub mod client;
pub mod player;

use async_trait::async_trait;

use crate::error::AppResult;

pub use catalog::{DEFAULT_OPACITY, FrameCatalog, RadarFrame, RadarOverlay};
pub use client::RadarClient;
pub use player::{AnimationPlayer, MIN_SPEED_MS, Playback, PlaybackState};

/// Radar imagery provider.
#[async_trait]
pub trait RadarSource: Send + Sync {
    /// Epoch seconds of the frames the provider currently serves.
    async fn frame_timestamps(&self) -> AppResult<Vec<i64>>;
}
