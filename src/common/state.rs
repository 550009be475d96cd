use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::aggregation::StationBoard;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::radar::{AnimationPlayer, FrameCatalog, RadarSource};
use crate::telemetry::{Station, TelemetryFetcher, TelemetrySource};

/// Station directory keyed by a constant; one entry, refreshed on TTL.
pub type DirectoryCache = Cache<&'static str, Arc<Vec<Station>>>;

const DIRECTORY_KEY: &str = "directory";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telemetry: TelemetryFetcher,
    pub radar_source: Arc<dyn RadarSource>,
    pub frame_catalog: Arc<FrameCatalog>,
    pub board: Arc<RwLock<StationBoard>>,
    pub player: Arc<Mutex<AnimationPlayer>>,
    pub directory_cache: DirectoryCache,
}

impl AppState {
    pub fn new(
        config: Config,
        telemetry_source: Arc<dyn TelemetrySource>,
        radar_source: Arc<dyn RadarSource>,
    ) -> Self {
        let directory_cache: DirectoryCache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(config.directory_cache_ttl_seconds))
            .build();

        let telemetry = TelemetryFetcher::new(telemetry_source, config.excluded_stations.clone());
        let frame_catalog = FrameCatalog::new(
            config.radar_tile_base_url.clone(),
            config.radar_lookback_minutes,
        );
        let player = AnimationPlayer::new(config.radar_default_speed_ms);

        Self {
            config: Arc::new(config),
            telemetry,
            radar_source,
            frame_catalog: Arc::new(frame_catalog),
            board: Arc::new(RwLock::new(StationBoard::new())),
            player: Arc::new(Mutex::new(player)),
            directory_cache,
        }
    }

    /// Station directory, served from cache while fresh. Failed loads are
    /// not cached.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the directory cannot be fetched.
    pub async fn station_directory(&self) -> AppResult<Arc<Vec<Station>>> {
        let source = Arc::clone(self.telemetry.source());
        self.directory_cache
            .try_get_with(DIRECTORY_KEY, async move {
                let stations = source.station_directory().await?;
                tracing::info!(stations = stations.len(), "Station directory loaded");
                Ok::<_, AppError>(Arc::new(stations))
            })
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))
    }
}
