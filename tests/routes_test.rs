//! HTTP surface tests against the full router with fake providers.
//!
//! Run with: cargo test --test routes_test

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use weather_monitor::aggregation::TimeWindow;
use weather_monitor::common::AppState;
use weather_monitor::config::Config;
use weather_monitor::error::{AppError, AppResult};
use weather_monitor::radar::RadarSource;
use weather_monitor::routes::build_router;
use weather_monitor::telemetry::{AlarmRecord, Reading, Station, StationMetrics, TelemetrySource};

struct FakeTelemetry;

#[async_trait]
impl TelemetrySource for FakeTelemetry {
    async fn station_directory(&self) -> AppResult<Vec<Station>> {
        Ok(vec![
            station("B01", "Blumenau", -26.922445, -49.13543),
            station("G02", "Gaspar", -26.926407, -48.964283),
            station("X99", "Ilhota", -26.894432, -48.82478),
        ])
    }

    async fn station_readings(&self, code: &str, _window: &TimeWindow) -> AppResult<Vec<Reading>> {
        let samples = match code {
            "B01" => vec![
                json!({ "datahora": "2024-05-01T10:00:00", "chuva": "1.5", "temperatura": "19.0" }),
                json!({ "datahora": "2024-05-01T11:00:00", "chuva": "2.5", "temperatura": "21.0" }),
            ],
            "G02" => vec![json!({ "datahora": "2024-05-01T11:00:00", "temperatura": "-1.5" })],
            _ => return Err(AppError::Upstream("station offline".to_string())),
        };
        Ok(samples.into_iter().filter_map(Reading::from_value).collect())
    }

    async fn alarm_records(&self) -> AppResult<Vec<AlarmRecord>> {
        let rows = json!([
            { "estacao": "SDC-SC Blumenau", "hora": "10:00", "valor": "5,34", "msg": "Alto" },
            { "estacao": "SDC-SC Gaspar", "hora": "10:00", "valor": 2.1, "msg": "Baixo" },
        ]);
        serde_json::from_value(rows).map_err(|e| AppError::Internal(e.to_string()))
    }
}

struct FakeRadar;

#[async_trait]
impl RadarSource for FakeRadar {
    async fn frame_timestamps(&self) -> AppResult<Vec<i64>> {
        let now = Utc::now().timestamp();
        Ok(vec![now - 5 * 3600, now - 1200, now - 600, now])
    }
}

fn station(code: &str, name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        id: code.to_string(),
        name: name.to_string(),
        latitude,
        longitude,
        description: "Itajaí-Açu".to_string(),
        metrics: StationMetrics::default(),
    }
}

fn state() -> AppState {
    AppState::new(
        Config::with_base_url("http://telemetry.invalid"),
        Arc::new(FakeTelemetry),
        Arc::new(FakeRadar),
    )
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = build_router(state.clone())
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(state, "GET", uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get_json(&state(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn stations_are_aggregated_in_directory_order() {
    let state = state();
    let (status, body) = get_json(&state, "/api/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parameter"], "accumulated_rain");
    assert_eq!(body["unit"], "mm");
    assert_eq!(body["window"]["hours"], 168);

    let stations = body["stations"].as_array().unwrap();
    let codes: Vec<&str> = stations.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(codes, ["B01", "G02", "X99"]);
    assert_eq!(stations[0]["metrics"]["accumulated_rain"], 4.0);
    assert_eq!(stations[1]["metrics"]["accumulated_rain"], 0.0);
    assert_eq!(stations[2]["metrics"]["accumulated_rain"], 0.0);

    let (_, current) = get_json(&state, "/api/stations/current").await;
    assert_eq!(current["generation"], 1);
    assert_eq!(current["stations"], body["stations"]);
}

#[tokio::test]
async fn temperature_uses_latest_reading_unclamped() {
    let (status, body) = get_json(&state(), "/api/stations?parameter=temperature&hours=24").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window"]["hours"], 24);
    assert_eq!(body["stations"][0]["metrics"]["temperature"], 21.0);
    assert_eq!(body["stations"][1]["metrics"]["temperature"], -1.5);
}

#[tokio::test]
async fn invalid_selection_is_rejected() {
    let state = state();

    let (status, body) = get_json(&state, "/api/stations?hours=36").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("36"));

    let (status, _) = get_json(&state, "/api/stations?parameter=humidity").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn station_lookup_search_and_region() {
    let state = state();

    let (status, body) = get_json(&state, "/api/stations/search?q=gas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "G02");

    let (status, body) = get_json(&state, "/api/stations/B01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Blumenau");

    let (status, _) = get_json(&state, "/api/stations/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, region) = get_json(&state, "/api/map/region").await;
    assert_eq!(region["latitude_delta"], 3.5);

    let (_, region) = get_json(&state, "/api/map/region?station=G02").await;
    assert_eq!(region["latitude"], -26.926407);
    assert_eq!(region["latitude_delta"], 0.1);
}

#[tokio::test]
async fn radar_controls_drive_playback() {
    let state = state();

    let (_, empty) = get_json(&state, "/api/radar").await;
    assert_eq!(empty["playback"]["frame_count"], 0);
    assert!(empty["overlay"].is_null());

    let (status, bytes) = send(&state, "POST", "/api/radar/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    let refreshed: Value = serde_json::from_slice(&bytes).unwrap();
    // Frame older than the look-back window is dropped
    assert_eq!(refreshed["frame_count"], 3);
    assert_eq!(refreshed["current_frame_index"], 0);

    let (_, bytes) = send(&state, "POST", "/api/radar/previous", None).await;
    let stepped: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stepped["current_frame_index"], 2);
    assert_eq!(stepped["progress_fraction"], 1.0);

    let (_, radar) = get_json(&state, "/api/radar?opacity=0.3").await;
    assert_eq!(radar["overlay"]["opacity"], 0.3);
    assert!(radar["overlay"]["tile_url"].as_str().unwrap().ends_with("/256/{z}/{x}/{y}/2/1_1.png"));

    let (_, bytes) = send(&state, "PUT", "/api/radar/speed", Some(json!({ "speed_ms": 100 }))).await;
    let sped: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(sped["speed_ms"], 500);

    let (_, bytes) = send(&state, "POST", "/api/radar/play", None).await;
    let playing: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(playing["is_playing"], true);
    assert_eq!(playing["current_frame_index"], 0);

    let (_, bytes) = send(&state, "POST", "/api/radar/pause", None).await;
    let paused: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(paused["is_playing"], false);
}

#[tokio::test]
async fn alarms_are_classified_and_exported() {
    let state = state();

    let (status, body) = get_json(&state, "/api/alarms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["severity"], "high");
    assert_eq!(body[1]["value"], "2.1");
    assert_eq!(body[1]["severity"], "low");

    let (status, bytes) = send(&state, "GET", "/api/alarms/export", None).await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(bytes).unwrap();
    assert!(csv.starts_with("station,time,value,message,severity\n"));
    assert!(csv.contains("SDC-SC Blumenau,10:00,\"5,34\",Alto,high"));
}

#[tokio::test]
async fn errors_map_to_status_and_json_body() {
    use axum::response::IntoResponse;

    let cases = [
        (AppError::BadRequest("bad hours".to_string()), StatusCode::BAD_REQUEST, "bad hours"),
        (AppError::NotFound("no station".to_string()), StatusCode::NOT_FOUND, "no station"),
        (
            AppError::Upstream("timeout".to_string()),
            StatusCode::BAD_GATEWAY,
            "Upstream provider error: timeout",
        ),
        (
            AppError::Internal("csv writer closed".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        ),
    ];

    for (error, status, message) in cases {
        assert_eq!(error.status(), status);
        let response = error.into_response();
        assert_eq!(response.status(), status);
        let body: Value =
            serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
        assert_eq!(body, json!({ "error": message }));
    }
}
