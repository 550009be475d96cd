use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::radar::{PlaybackState, RadarOverlay};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RadarQuery {
    /// Overlay opacity in [0, 1], default 0.5
    pub opacity: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RadarResponse {
    pub playback: PlaybackState,
    /// Absent when the catalog is empty
    pub overlay: Option<RadarOverlay>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SpeedRequest {
    /// Milliseconds per frame, at least 500
    pub speed_ms: u64,
}
