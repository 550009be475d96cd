use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_monitor::common::AppState;
use weather_monitor::config::Config;
use weather_monitor::radar::RadarClient;
use weather_monitor::routes;
use weather_monitor::sync;
use weather_monitor::telemetry::TelemetryClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,weather_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting weather-monitor...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        deployment = ?config.deployment,
        telemetry = %config.telemetry_base_url,
        excluded_stations = config.excluded_stations.len(),
        host = %config.api_host,
        port = config.api_port,
        "Configuration loaded"
    );

    // Provider clients
    let telemetry_client = TelemetryClient::new(&config)?;
    let radar_client = RadarClient::new(&config)?;
    tracing::info!("Provider clients initialized");

    let state = AppState::new(config.clone(), Arc::new(telemetry_client), Arc::new(radar_client));

    // Radar catalog refresh runs for the lifetime of the process
    tracing::info!("Spawning radar refresh task...");
    let radar_refresh = tokio::spawn(sync::scheduler::run_radar_refresh(state.clone()));

    let app = routes::build_router(state.clone());

    let addr = config.bind_address();
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown: stop the refresh loop and the animation timer
    radar_refresh.abort();
    state.player.lock().await.pause().await;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
