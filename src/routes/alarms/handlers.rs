use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::Response,
};

use crate::alarms::{self, AlarmEvent};
use crate::common::AppState;
use crate::error::{AppError, AppResult};

/// List alarm events with their severity
#[utoipa::path(
    get,
    path = "/api/alarms",
    responses(
        (status = 200, description = "Alarm events", body = Vec<AlarmEvent>),
    ),
    tag = "alarms"
)]
pub async fn list_alarms(State(state): State<AppState>) -> Json<Vec<AlarmEvent>> {
    let events = alarms::fetch_alarms(state.telemetry.source().as_ref()).await;
    Json(events)
}

/// Download alarm events as CSV
#[utoipa::path(
    get,
    path = "/api/alarms/export",
    responses(
        (status = 200, description = "CSV file", body = String, content_type = "text/csv"),
    ),
    tag = "alarms"
)]
pub async fn export_alarms(State(state): State<AppState>) -> AppResult<Response> {
    let events = alarms::fetch_alarms(state.telemetry.source().as_ref()).await;
    let body = alarms::to_csv(&events)?;

    Response::builder()
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"))
        .header(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"alarms.csv\""),
        )
        .body(axum::body::Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}
