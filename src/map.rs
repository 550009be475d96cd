use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry::Station;

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Whole monitored basin, shown when nothing is selected.
    pub const OVERVIEW: Self = Self {
        latitude: -27.2423,
        longitude: -50.2189,
        latitude_delta: 3.5,
        longitude_delta: 3.5,
    };

    const STATION_DELTA: f64 = 0.1;

    #[must_use]
    pub fn for_selection(selected: Option<&Station>) -> Self {
        selected.map_or(Self::OVERVIEW, |station| Self {
            latitude: station.latitude,
            longitude: station.longitude,
            latitude_delta: Self::STATION_DELTA,
            longitude_delta: Self::STATION_DELTA,
        })
    }
}

/// Stations whose name contains `query`, ignoring case. Directory order is
/// kept; a blank query matches everything.
#[must_use]
pub fn search_stations<'a>(directory: &'a [Station], query: &str) -> Vec<&'a Station> {
    let needle = query.trim().to_lowercase();
    directory
        .iter()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .collect()
}
