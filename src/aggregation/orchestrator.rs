use futures::future::join_all;
use tokio::sync::RwLock;

use crate::aggregation::{BoardSnapshot, FieldCatalog, ParameterType, StationBoard, TimeWindow, aggregate};
use crate::telemetry::{Reading, Station, TelemetryFetcher};

/// Display value of one station's batch.
#[must_use]
pub fn station_value(fields: &FieldCatalog, parameter: ParameterType, readings: &[Reading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    match fields.resolve(parameter, readings) {
        Some(field) => aggregate(parameter, readings, field),
        None => 0.0,
    }
}

/// Enrich every directory entry with its value for `parameter`.
///
/// All stations are fetched concurrently and the call returns only once each
/// of them has settled. Output order is directory order, independent of
/// which fetch finished first.
pub async fn aggregate_stations(
    fetcher: &TelemetryFetcher,
    fields: &FieldCatalog,
    directory: &[Station],
    parameter: ParameterType,
    window: &TimeWindow,
) -> Vec<Station> {
    let pending = directory.iter().map(|station| async move {
        let readings = fetcher.fetch(&station.id, window).await;
        let value = station_value(fields, parameter, &readings);

        let mut enriched = station.clone();
        enriched.metrics.set(parameter, value);
        enriched
    });

    join_all(pending).await
}

/// Run one full cycle against the shared board.
///
/// The returned snapshot always holds this cycle's own stations. The board
/// itself is only updated when no newer cycle landed first.
pub async fn run_cycle(
    board: &RwLock<StationBoard>,
    fetcher: &TelemetryFetcher,
    fields: &FieldCatalog,
    directory: &[Station],
    parameter: ParameterType,
    window: TimeWindow,
) -> BoardSnapshot {
    let generation = board.write().await.begin_cycle();

    tracing::debug!(
        generation,
        %parameter,
        hours = window.hours,
        stations = directory.len(),
        "Starting aggregation cycle"
    );

    let stations = aggregate_stations(fetcher, fields, directory, parameter, &window).await;

    let applied = board
        .write()
        .await
        .apply(generation, parameter, window, stations.clone());

    if applied {
        tracing::info!(generation, %parameter, stations = stations.len(), "Aggregation cycle applied");
    } else {
        tracing::debug!(generation, %parameter, "Discarding stale aggregation cycle");
    }

    BoardSnapshot {
        generation,
        parameter,
        unit: parameter.unit().to_string(),
        label: parameter.label().to_string(),
        window: Some(window),
        stations,
    }
}
