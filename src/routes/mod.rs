pub mod alarms;
pub mod health;
pub mod radar;
pub mod stations;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        stations::aggregate_stations,
        stations::current_stations,
        stations::search_stations,
        stations::get_station,
        stations::map_region,
        radar::get_radar,
        radar::play,
        radar::pause,
        radar::next_frame,
        radar::previous_frame,
        radar::set_speed,
        radar::refresh_catalog,
        alarms::list_alarms,
        alarms::export_alarms,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::telemetry::Station,
            crate::telemetry::StationMetrics,
            crate::aggregation::BoardSnapshot,
            crate::aggregation::ParameterType,
            crate::aggregation::TimeWindow,
            crate::map::MapRegion,
            crate::radar::RadarFrame,
            crate::radar::RadarOverlay,
            crate::radar::PlaybackState,
            radar::RadarResponse,
            radar::SpeedRequest,
            crate::alarms::AlarmEvent,
            crate::alarms::Severity,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stations", description = "Station aggregation and lookup"),
        (name = "radar", description = "Radar overlay and animation controls"),
        (name = "alarms", description = "Alarm events"),
    ),
    info(
        title = "Weather Monitor API",
        description = "Station aggregation and radar animation for the monitoring map",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let station_routes = Router::new()
        .route("/stations", get(stations::aggregate_stations))
        .route("/stations/current", get(stations::current_stations))
        .route("/stations/search", get(stations::search_stations))
        .route("/stations/{code}", get(stations::get_station))
        .route("/map/region", get(stations::map_region));

    let radar_routes = Router::new()
        .route("/radar", get(radar::get_radar))
        .route("/radar/play", post(radar::play))
        .route("/radar/pause", post(radar::pause))
        .route("/radar/next", post(radar::next_frame))
        .route("/radar/previous", post(radar::previous_frame))
        .route("/radar/speed", put(radar::set_speed))
        .route("/radar/refresh", post(radar::refresh_catalog));

    let alarm_routes = Router::new()
        .route("/alarms", get(alarms::list_alarms))
        .route("/alarms/export", get(alarms::export_alarms));

    let api_routes = Router::new()
        .merge(station_routes)
        .merge(radar_routes)
        .merge(alarm_routes);

    // Health check routes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
