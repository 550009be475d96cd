use std::env;

use crate::aggregation::FieldCatalog;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Telemetry provider
    pub telemetry_base_url: String,
    pub telemetry_bearer_token: Option<String>,
    pub telemetry_utc_offset_minutes: i32,
    pub excluded_stations: Vec<String>,

    // Field-name configuration
    pub fields: FieldCatalog,

    // Radar provider
    pub radar_catalog_url: String,
    pub radar_tile_base_url: String,
    pub radar_refresh_interval_seconds: u64,
    pub radar_lookback_minutes: i64,
    pub radar_default_speed_ms: u64,

    // HTTP client
    pub http_timeout_seconds: u64,

    // Caching
    pub directory_cache_ttl_seconds: u64,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = FieldCatalog::default();
        let fields = FieldCatalog {
            rain_candidates: list_var("RAIN_FIELD_CANDIDATES")
                .unwrap_or(defaults.rain_candidates),
            rain_default: env::var("RAIN_DEFAULT_FIELD").unwrap_or(defaults.rain_default),
            river_candidates: list_var("RIVER_FIELD_CANDIDATES")
                .unwrap_or(defaults.river_candidates),
            instant_rain: env::var("INSTANT_RAIN_FIELD").unwrap_or(defaults.instant_rain),
            landslide_rain: env::var("LANDSLIDE_RAIN_FIELD").unwrap_or(defaults.landslide_rain),
            temperature: env::var("TEMPERATURE_FIELD").unwrap_or(defaults.temperature),
        };

        Ok(Self {
            // Telemetry provider
            telemetry_base_url: env::var("TELEMETRY_BASE_URL")
                .map_err(|_| ConfigError::Missing("TELEMETRY_BASE_URL"))?,
            telemetry_bearer_token: env::var("TELEMETRY_BEARER_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            telemetry_utc_offset_minutes: env::var("TELEMETRY_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "-180".to_string())
                .parse()
                .unwrap_or(-180), // Brasília time
            excluded_stations: list_var("TELEMETRY_EXCLUDED_STATIONS").unwrap_or_default(),

            fields,

            // Radar provider
            radar_catalog_url: env::var("RADAR_CATALOG_URL")
                .unwrap_or_else(|_| "https://tilecache.rainviewer.com/api/maps.json".to_string()),
            radar_tile_base_url: env::var("RADAR_TILE_BASE_URL")
                .unwrap_or_else(|_| "https://tilecache.rainviewer.com/v2/radar/".to_string()),
            radar_refresh_interval_seconds: env::var("RADAR_REFRESH_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap_or(600),
            radar_lookback_minutes: env::var("RADAR_LOOKBACK_MINUTES")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap_or(120),
            radar_default_speed_ms: env::var("RADAR_DEFAULT_SPEED_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(1000),

            // HTTP client
            http_timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Caching
            directory_cache_ttl_seconds: env::var("DIRECTORY_CACHE_TTL_SECONDS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600), // 1 hour default

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    /// Configuration with every optional setting at its default.
    #[must_use]
    pub fn with_base_url(telemetry_base_url: impl Into<String>) -> Self {
        Self {
            telemetry_base_url: telemetry_base_url.into(),
            telemetry_bearer_token: None,
            telemetry_utc_offset_minutes: -180,
            excluded_stations: Vec::new(),
            fields: FieldCatalog::default(),
            radar_catalog_url: "https://tilecache.rainviewer.com/api/maps.json".to_string(),
            radar_tile_base_url: "https://tilecache.rainviewer.com/v2/radar/".to_string(),
            radar_refresh_interval_seconds: 600,
            radar_lookback_minutes: 120,
            radar_default_speed_ms: 1000,
            http_timeout_seconds: 30,
            directory_cache_ttl_seconds: 3600,
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            deployment: Deployment::Local,
        }
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Read a comma-separated variable. Blank entries are dropped; an unset or
/// blank variable yields `None`.
fn list_var(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
