use ev_telemetry_api::repositories::{AnalyticsRepository, MeterRepository, VehicleRepository};
use ev_telemetry_api::routes::{self, AppState};
use ev_telemetry_api::services::{AnalyticsService, MeterIngestionService, VehicleIngestionService};
use ev_telemetry_api::{create_pool, Config};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ev_telemetry_api=debug".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Create database pool
    let pool = create_pool(&config).await?;
    info!("Database connection pool created");

    // Wire repositories and services
    let state = AppState {
        pool: pool.clone(),
        meter_ingestion: MeterIngestionService::new(MeterRepository::new(pool.clone())),
        vehicle_ingestion: VehicleIngestionService::new(VehicleRepository::new(pool.clone())),
        analytics: AnalyticsService::new(AnalyticsRepository::new(pool)),
    };

    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
