use chrono::Utc;
use std::time::Duration;
use tokio::time::interval;

use crate::common::AppState;
use crate::radar::PlaybackState;

/// Rebuild the radar catalog and hand it to the player.
///
/// The whole sequence is replaced; a failed fetch installs an empty catalog.
pub async fn refresh_radar(state: &AppState) -> PlaybackState {
    let frames = state
        .frame_catalog
        .fetch(state.radar_source.as_ref(), Utc::now())
        .await;
    let frame_count = frames.len();

    let playback = state.player.lock().await.replace_frames(frames).await;
    tracing::debug!(
        frames = frame_count,
        index = playback.current_frame_index,
        "Radar catalog refreshed"
    );
    playback
}

/// Run the radar catalog refresh on a schedule.
pub async fn run_radar_refresh(state: AppState) {
    let interval_secs = state.config.radar_refresh_interval_seconds.max(1);

    tracing::info!(interval_secs, "Starting radar refresh scheduler");

    let mut ticker = interval(Duration::from_secs(interval_secs));

    loop {
        // First tick completes immediately
        ticker.tick().await;
        refresh_radar(&state).await;
    }
}
