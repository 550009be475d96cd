//! Radar animation playback.
//!
//! [`Playback`] is the pure state machine: frame sequence, position, speed
//! and play flag. [`AnimationPlayer`] wraps it with the repeating timer that
//! drives it while playing. The player owns at most one timer task at a
//! time; every transition that starts a timer aborts the previous one first,
//! and dropping the player aborts whatever is left.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use utoipa::ToSchema;

use crate::radar::RadarFrame;

/// Fastest allowed frame interval.
pub const MIN_SPEED_MS: u64 = 500;

/// Serializable view of the playback.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlaybackState {
    pub current_frame_index: usize,
    pub frame_count: usize,
    pub is_playing: bool,
    pub speed_ms: u64,
    pub progress_fraction: f64,
    pub current_frame: Option<RadarFrame>,
}

#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<RadarFrame>,
    index: usize,
    playing: bool,
    speed_ms: u64,
}

impl Playback {
    #[must_use]
    pub fn new(speed_ms: u64) -> Self {
        Self {
            frames: Vec::new(),
            index: 0,
            playing: false,
            speed_ms: speed_ms.max(MIN_SPEED_MS),
        }
    }

    #[must_use]
    pub fn frames(&self) -> &[RadarFrame] {
        &self.frames
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// `index / (count - 1)`, or 0 with fewer than two frames.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let count = self.frames.len();
        if count <= 1 {
            return 0.0;
        }
        self.index as f64 / (count - 1) as f64
    }

    #[must_use]
    pub fn current_frame(&self) -> Option<&RadarFrame> {
        self.frames.get(self.index)
    }

    /// Whether there is enough to animate.
    #[must_use]
    pub fn can_play(&self) -> bool {
        self.frames.len() > 1
    }

    /// One step forward, wrapping at the end.
    pub fn advance(&mut self) {
        let count = self.frames.len();
        if count > 0 {
            self.index = (self.index + 1) % count;
        }
    }

    /// One step back, wrapping at the start.
    pub fn retreat(&mut self) {
        let count = self.frames.len();
        if count > 0 {
            self.index = (self.index + count - 1) % count;
        }
    }

    /// Returns the applied speed after clamping.
    pub fn set_speed(&mut self, speed_ms: u64) -> u64 {
        self.speed_ms = speed_ms.max(MIN_SPEED_MS);
        self.speed_ms
    }

    /// Swap in a freshly built catalog. A position that no longer fits moves
    /// to the last frame.
    pub fn replace_frames(&mut self, frames: Vec<RadarFrame>) {
        self.frames = frames;
        if self.index >= self.frames.len() {
            self.index = self.frames.len().saturating_sub(1);
        }
    }

    fn start(&mut self) {
        self.index = 0;
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_frame_index: self.index,
            frame_count: self.frames.len(),
            is_playing: self.playing,
            speed_ms: self.speed_ms,
            progress_fraction: self.progress(),
            current_frame: self.current_frame().cloned(),
        }
    }
}

pub struct AnimationPlayer {
    playback: Arc<Mutex<Playback>>,
    timer: Option<JoinHandle<()>>,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new(speed_ms: u64) -> Self {
        Self {
            playback: Arc::new(Mutex::new(Playback::new(speed_ms))),
            timer: None,
        }
    }

    /// Start from the first frame. Ignored while already playing and when
    /// the catalog has fewer than two frames.
    pub async fn play(&mut self) -> PlaybackState {
        let mut playback = self.playback.lock().await;
        if playback.is_playing() || !playback.can_play() {
            return playback.state();
        }
        playback.start();
        let speed_ms = playback.speed_ms();
        let state = playback.state();
        drop(playback);

        self.start_timer(speed_ms);
        tracing::debug!(speed_ms, frames = state.frame_count, "Radar playback started");
        state
    }

    /// Stop the timer, keeping the current frame.
    pub async fn pause(&mut self) -> PlaybackState {
        self.cancel_timer();
        let mut playback = self.playback.lock().await;
        playback.stop();
        tracing::debug!(index = playback.index(), "Radar playback paused");
        playback.state()
    }

    pub async fn step_next(&mut self) -> PlaybackState {
        let mut playback = self.playback.lock().await;
        playback.advance();
        playback.state()
    }

    pub async fn step_previous(&mut self) -> PlaybackState {
        let mut playback = self.playback.lock().await;
        playback.retreat();
        playback.state()
    }

    /// Change the frame interval. While playing, the timer restarts so the
    /// next advance happens one new interval from now.
    pub async fn set_speed(&mut self, speed_ms: u64) -> PlaybackState {
        let mut playback = self.playback.lock().await;
        let applied = playback.set_speed(speed_ms);
        let playing = playback.is_playing();
        let state = playback.state();
        drop(playback);

        if playing {
            self.start_timer(applied);
        }
        tracing::debug!(requested = speed_ms, applied, "Radar playback speed changed");
        state
    }

    /// Install a refreshed catalog. Playback stops if fewer than two frames
    /// remain.
    pub async fn replace_frames(&mut self, frames: Vec<RadarFrame>) -> PlaybackState {
        let mut playback = self.playback.lock().await;
        playback.replace_frames(frames);
        let must_stop = playback.is_playing() && !playback.can_play();
        if must_stop {
            playback.stop();
        }
        let state = playback.state();
        drop(playback);

        if must_stop {
            self.cancel_timer();
            tracing::debug!("Radar playback stopped, not enough frames");
        }
        state
    }

    pub async fn state(&self) -> PlaybackState {
        self.playback.lock().await.state()
    }

    /// Playback shared with the timer task. Outlives the player when cloned.
    #[must_use]
    pub fn shared_playback(&self) -> Arc<Mutex<Playback>> {
        Arc::clone(&self.playback)
    }

    /// Whether a timer task is alive.
    #[must_use]
    pub fn has_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn start_timer(&mut self, speed_ms: u64) {
        self.cancel_timer();

        let playback = Arc::clone(&self.playback);
        let period = Duration::from_millis(speed_ms);
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut playback = playback.lock().await;
                if !playback.is_playing() {
                    break;
                }
                playback.advance();
                tracing::trace!(index = playback.index(), "Radar frame advanced");
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for AnimationPlayer {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
