use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::aggregation::{self, ALLOWED_WINDOW_HOURS, BoardSnapshot, ParameterType, TimeWindow};
use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::map::{self, MapRegion};
use crate::telemetry::Station;

use super::types::{RegionQuery, SearchQuery, StationsQuery};

/// Aggregate every station for a parameter and time range
#[utoipa::path(
    get,
    path = "/api/stations",
    params(StationsQuery),
    responses(
        (status = 200, description = "Stations aggregated", body = BoardSnapshot),
        (status = 400, description = "Unknown parameter or unsupported time range"),
        (status = 502, description = "Station directory unavailable"),
    ),
    tag = "stations"
)]
pub async fn aggregate_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> AppResult<Json<BoardSnapshot>> {
    let parameter = match query.parameter.as_deref() {
        Some(raw) => raw
            .parse::<ParameterType>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => ParameterType::default(),
    };

    let now = Utc::now();
    let window = match query.hours {
        Some(hours) => TimeWindow::ending_at(now, hours).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported time range {hours}h, expected one of {ALLOWED_WINDOW_HOURS:?}"
            ))
        })?,
        None => TimeWindow::default_ending_at(now),
    };

    let directory = state.station_directory().await?;

    let snapshot = aggregation::run_cycle(
        &state.board,
        &state.telemetry,
        &state.config.fields,
        &directory,
        parameter,
        window,
    )
    .await;

    Ok(Json(snapshot))
}

/// Stations as last applied to the map
#[utoipa::path(
    get,
    path = "/api/stations/current",
    responses(
        (status = 200, description = "Current station board", body = BoardSnapshot),
    ),
    tag = "stations"
)]
pub async fn current_stations(State(state): State<AppState>) -> Json<BoardSnapshot> {
    Json(state.board.read().await.snapshot())
}

/// Search stations by name
#[utoipa::path(
    get,
    path = "/api/stations/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching stations", body = Vec<Station>),
        (status = 502, description = "Station directory unavailable"),
    ),
    tag = "stations"
)]
pub async fn search_stations(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Station>>> {
    let directory = state.station_directory().await?;
    let matches = map::search_stations(&directory, query.q.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matches))
}

/// Get one station, with its computed values when available
#[utoipa::path(
    get,
    path = "/api/stations/{code}",
    params(
        ("code" = String, Path, description = "Station code"),
    ),
    responses(
        (status = 200, description = "Station retrieved successfully", body = Station),
        (status = 404, description = "Station not found"),
    ),
    tag = "stations"
)]
pub async fn get_station(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Station>> {
    find_station(&state, &code).await.map(Json)
}

/// Map region for the current selection
#[utoipa::path(
    get,
    path = "/api/map/region",
    params(RegionQuery),
    responses(
        (status = 200, description = "Region to display", body = MapRegion),
        (status = 404, description = "Station not found"),
    ),
    tag = "stations"
)]
pub async fn map_region(
    State(state): State<AppState>,
    Query(query): Query<RegionQuery>,
) -> AppResult<Json<MapRegion>> {
    let selected = match query.station.as_deref().filter(|s| !s.is_empty()) {
        Some(code) => Some(find_station(&state, code).await?),
        None => None,
    };
    Ok(Json(MapRegion::for_selection(selected.as_ref())))
}

/// Look a station up on the board first, then in the directory.
async fn find_station(state: &AppState, code: &str) -> AppResult<Station> {
    if let Some(station) = state
        .board
        .read()
        .await
        .stations()
        .iter()
        .find(|s| s.id == code)
    {
        return Ok(station.clone());
    }

    state
        .station_directory()
        .await?
        .iter()
        .find(|s| s.id == code)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Station '{code}' not found")))
}
