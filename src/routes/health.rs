use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Frames in the current radar catalog
    pub radar_frames: usize,
    /// Generation of the last applied aggregation cycle
    pub board_generation: u64,
}

/// Liveness check with a glimpse of background state
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let radar_frames = state.player.lock().await.state().await.frame_count;
    let board_generation = state.board.read().await.applied_generation();
    Json(HealthResponse {
        status: "ok".to_string(),
        radar_frames,
        board_generation,
    })
}
