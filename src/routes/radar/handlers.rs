use axum::{
    Json,
    extract::{Query, State},
};

use crate::common::AppState;
use crate::radar::{PlaybackState, RadarOverlay};
use crate::sync::scheduler;

use super::types::{RadarQuery, RadarResponse, SpeedRequest};

/// Current radar frame and playback progress
#[utoipa::path(
    get,
    path = "/api/radar",
    params(RadarQuery),
    responses(
        (status = 200, description = "Radar overlay and playback state", body = RadarResponse),
    ),
    tag = "radar"
)]
pub async fn get_radar(
    State(state): State<AppState>,
    Query(query): Query<RadarQuery>,
) -> Json<RadarResponse> {
    let playback = state.player.lock().await.state().await;
    let overlay = playback
        .current_frame
        .as_ref()
        .map(|frame| RadarOverlay::new(frame, query.opacity));
    Json(RadarResponse { playback, overlay })
}

/// Start the animation from the first frame
#[utoipa::path(
    post,
    path = "/api/radar/play",
    responses((status = 200, description = "Playback state", body = PlaybackState)),
    tag = "radar"
)]
pub async fn play(State(state): State<AppState>) -> Json<PlaybackState> {
    Json(state.player.lock().await.play().await)
}

/// Pause on the current frame
#[utoipa::path(
    post,
    path = "/api/radar/pause",
    responses((status = 200, description = "Playback state", body = PlaybackState)),
    tag = "radar"
)]
pub async fn pause(State(state): State<AppState>) -> Json<PlaybackState> {
    Json(state.player.lock().await.pause().await)
}

/// Step one frame forward
#[utoipa::path(
    post,
    path = "/api/radar/next",
    responses((status = 200, description = "Playback state", body = PlaybackState)),
    tag = "radar"
)]
pub async fn next_frame(State(state): State<AppState>) -> Json<PlaybackState> {
    Json(state.player.lock().await.step_next().await)
}

/// Step one frame back
#[utoipa::path(
    post,
    path = "/api/radar/previous",
    responses((status = 200, description = "Playback state", body = PlaybackState)),
    tag = "radar"
)]
pub async fn previous_frame(State(state): State<AppState>) -> Json<PlaybackState> {
    Json(state.player.lock().await.step_previous().await)
}

/// Change the frame interval
#[utoipa::path(
    put,
    path = "/api/radar/speed",
    request_body = SpeedRequest,
    responses((status = 200, description = "Playback state", body = PlaybackState)),
    tag = "radar"
)]
pub async fn set_speed(
    State(state): State<AppState>,
    Json(request): Json<SpeedRequest>,
) -> Json<PlaybackState> {
    Json(state.player.lock().await.set_speed(request.speed_ms).await)
}

/// Rebuild the frame catalog now instead of waiting for the schedule
#[utoipa::path(
    post,
    path = "/api/radar/refresh",
    responses((status = 200, description = "Playback state", body = PlaybackState)),
    tag = "radar"
)]
pub async fn refresh_catalog(State(state): State<AppState>) -> Json<PlaybackState> {
    Json(scheduler::refresh_radar(&state).await)
}
