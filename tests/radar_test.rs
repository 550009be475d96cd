//! Tests for the radar frame catalog and the animation player.
//!
//! Run with: cargo test --test radar_test

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use weather_monitor::error::{AppError, AppResult};
use weather_monitor::radar::{
    AnimationPlayer, DEFAULT_OPACITY, FrameCatalog, MIN_SPEED_MS, Playback, RadarFrame,
    RadarOverlay, RadarSource,
};

const BASE: &str = "https://tiles.example/radar/";

fn frames(count: usize) -> Vec<RadarFrame> {
    (0..count)
        .map(|i| RadarFrame::new(BASE, 1_700_000_000 + 600 * i as i64))
        .collect()
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

struct StaticRadar(AppResult<Vec<i64>>);

#[async_trait]
impl RadarSource for StaticRadar {
    async fn frame_timestamps(&self) -> AppResult<Vec<i64>> {
        match &self.0 {
            Ok(ts) => Ok(ts.clone()),
            Err(e) => Err(AppError::Upstream(e.to_string())),
        }
    }
}

#[test]
fn tile_url_follows_provider_pattern() {
    let frame = RadarFrame::new(BASE, 1_700_000_000);
    assert_eq!(
        frame.tile_url,
        "https://tiles.example/radar/1700000000/256/{z}/{x}/{y}/2/1_1.png"
    );
    assert_eq!(
        frame.tile(7, 45, 73),
        "https://tiles.example/radar/1700000000/256/7/45/73/2/1_1.png"
    );
}

#[test]
fn catalog_drops_frames_older_than_lookback() {
    let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
    let now_ts = now.timestamp();
    let catalog = FrameCatalog::new(BASE, 120);

    let built = catalog.build(
        &[
            now_ts - 3 * 3600,
            now_ts - 600,
            now_ts - 2 * 3600,
            now_ts - 2 * 3600 - 1,
            now_ts - 600,
        ],
        now,
    );

    let kept: Vec<i64> = built.iter().map(|f| f.timestamp).collect();
    assert_eq!(kept, [now_ts - 2 * 3600, now_ts - 600]);
}

#[tokio::test]
async fn catalog_fails_soft_to_empty() {
    let catalog = FrameCatalog::new(BASE, 120);
    let failing = StaticRadar(Err(AppError::Upstream("timeout".to_string())));

    assert!(catalog.fetch(&failing, Utc::now()).await.is_empty());
}

#[tokio::test]
async fn catalog_fetch_builds_recent_frames() {
    let now = Utc::now();
    let catalog = FrameCatalog::new(BASE, 120);
    let source = StaticRadar(Ok(vec![now.timestamp() - 300, now.timestamp() - 86_400]));

    let built = catalog.fetch(&source, now).await;
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].timestamp, now.timestamp() - 300);
}

#[test]
fn playback_ticks_wrap_and_progress() {
    let mut playback = Playback::new(1000);
    playback.replace_frames(frames(5));
    assert_eq!(playback.index(), 0);
    assert_eq!(playback.progress(), 0.0);

    for _ in 0..4 {
        playback.advance();
    }
    assert_eq!(playback.index(), 4);
    assert_eq!(playback.progress(), 1.0);

    playback.advance();
    assert_eq!(playback.index(), 0);
    assert_eq!(playback.progress(), 0.0);

    playback.retreat();
    assert_eq!(playback.index(), 4);
    assert_eq!(playback.current_frame(), frames(5).last());
}

#[test]
fn playback_with_single_frame_has_no_progress() {
    let mut playback = Playback::new(1000);
    assert_eq!(playback.progress(), 0.0);
    playback.advance();
    assert_eq!(playback.index(), 0);

    playback.replace_frames(frames(1));
    playback.advance();
    assert_eq!(playback.index(), 0);
    assert_eq!(playback.progress(), 0.0);
    assert!(!playback.can_play());
}

#[test]
fn refresh_resets_invalid_position_to_last_frame() {
    let mut playback = Playback::new(1000);
    playback.replace_frames(frames(8));
    for _ in 0..6 {
        playback.advance();
    }
    assert_eq!(playback.index(), 6);

    // Still valid in a longer catalog
    playback.replace_frames(frames(10));
    assert_eq!(playback.index(), 6);

    // Out of range in a shorter one
    playback.replace_frames(frames(4));
    assert_eq!(playback.index(), 3);

    playback.replace_frames(Vec::new());
    assert_eq!(playback.index(), 0);
    assert!(playback.current_frame().is_none());
}

#[test]
fn speed_is_clamped_to_minimum() {
    let mut playback = Playback::new(100);
    assert_eq!(playback.speed_ms(), MIN_SPEED_MS);
    assert_eq!(playback.set_speed(200), MIN_SPEED_MS);
    assert_eq!(playback.set_speed(60_000), 60_000);
}

#[test]
fn overlay_opacity_defaults_and_clamps() {
    let frame = RadarFrame::new(BASE, 1);
    assert_eq!(RadarOverlay::new(&frame, None).opacity, DEFAULT_OPACITY);
    assert_eq!(RadarOverlay::new(&frame, Some(1.7)).opacity, 1.0);
    assert_eq!(RadarOverlay::new(&frame, Some(-0.2)).opacity, 0.0);
    assert_eq!(RadarOverlay::new(&frame, Some(f64::NAN)).opacity, DEFAULT_OPACITY);
    assert_eq!(RadarOverlay::new(&frame, Some(0.8)).opacity, 0.8);
}

#[tokio::test(start_paused = true)]
async fn play_advances_on_timer_and_wraps() {
    let mut player = AnimationPlayer::new(500);
    player.replace_frames(frames(5)).await;
    player.step_next().await;
    player.step_next().await;

    let started = player.play().await;
    assert!(started.is_playing);
    assert_eq!(started.current_frame_index, 0);
    assert!(player.has_timer());

    sleep_ms(2250).await;
    let state = player.state().await;
    assert_eq!(state.current_frame_index, 4);
    assert_eq!(state.progress_fraction, 1.0);
    assert_eq!(state.current_frame, frames(5).pop());

    sleep_ms(500).await;
    let state = player.state().await;
    assert_eq!(state.current_frame_index, 0);
    assert_eq!(state.progress_fraction, 0.0);
}

#[tokio::test(start_paused = true)]
async fn play_is_noop_without_enough_frames() {
    for count in [0, 1] {
        let mut player = AnimationPlayer::new(500);
        player.replace_frames(frames(count)).await;

        let state = player.play().await;
        assert!(!state.is_playing);
        assert!(!player.has_timer());
        assert_eq!(state.progress_fraction, 0.0);

        sleep_ms(2000).await;
        assert_eq!(player.state().await.current_frame_index, 0);
    }
}

#[tokio::test(start_paused = true)]
async fn pause_keeps_position_and_stops_timer() {
    let mut player = AnimationPlayer::new(500);
    player.replace_frames(frames(5)).await;
    player.play().await;

    sleep_ms(1250).await;
    let paused = player.pause().await;
    assert!(!paused.is_playing);
    assert_eq!(paused.current_frame_index, 2);
    assert!(!player.has_timer());

    sleep_ms(3000).await;
    assert_eq!(player.state().await.current_frame_index, 2);

    // Steps still work while stopped
    assert_eq!(player.step_previous().await.current_frame_index, 1);
    assert_eq!(player.step_next().await.current_frame_index, 2);
}

#[tokio::test(start_paused = true)]
async fn set_speed_restarts_timer_without_skipping_or_doubling() {
    let mut player = AnimationPlayer::new(1000);
    player.replace_frames(frames(10)).await;
    player.play().await;

    sleep_ms(1250).await;
    assert_eq!(player.state().await.current_frame_index, 1);

    let state = player.set_speed(2000).await;
    assert_eq!(state.speed_ms, 2000);
    assert!(state.is_playing);
    assert!(player.has_timer());

    // Old 1000 ms cadence would have advanced at 2000 ms
    sleep_ms(1750).await;
    assert_eq!(player.state().await.current_frame_index, 1);

    // New cadence: one interval after the speed change
    sleep_ms(500).await;
    assert_eq!(player.state().await.current_frame_index, 2);

    sleep_ms(2000).await;
    assert_eq!(player.state().await.current_frame_index, 3);
}

#[tokio::test(start_paused = true)]
async fn set_speed_while_stopped_does_not_start_timer() {
    let mut player = AnimationPlayer::new(1000);
    player.replace_frames(frames(3)).await;

    let state = player.set_speed(100).await;
    assert_eq!(state.speed_ms, MIN_SPEED_MS);
    assert!(!state.is_playing);
    assert!(!player.has_timer());
}

#[tokio::test(start_paused = true)]
async fn dropping_player_releases_timer() {
    let mut player = AnimationPlayer::new(500);
    player.replace_frames(frames(5)).await;
    player.play().await;

    sleep_ms(750).await;
    let shared = player.shared_playback();
    assert_eq!(shared.lock().await.index(), 1);
    assert_eq!(Arc::strong_count(&shared), 3);

    drop(player);
    sleep_ms(3000).await;

    // No tick landed after teardown and the aborted task let go of its handle
    assert_eq!(shared.lock().await.index(), 1);
    assert_eq!(Arc::strong_count(&shared), 1);
}

#[tokio::test(start_paused = true)]
async fn shrinking_catalog_stops_playback() {
    let mut player = AnimationPlayer::new(500);
    player.replace_frames(frames(4)).await;
    player.play().await;
    assert!(player.has_timer());

    let state = player.replace_frames(frames(1)).await;
    assert!(!state.is_playing);
    assert_eq!(state.current_frame_index, 0);
    assert!(!player.has_timer());
}
