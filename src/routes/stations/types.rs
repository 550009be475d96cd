use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StationsQuery {
    /// accumulated_rain (default), instant_rain, landslide_rain, river_level or temperature
    pub parameter: Option<String>,
    /// Window length: 24, 48, 72, 120 or 168 (default)
    pub hours: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the station name
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RegionQuery {
    /// Selected station code, if any
    pub station: Option<String>,
}
