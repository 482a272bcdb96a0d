use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DbPool;
use crate::handlers::{analytics, health, ingestion};
use crate::services::{AnalyticsService, MeterIngestionService, VehicleIngestionService};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub meter_ingestion: MeterIngestionService,
    pub vehicle_ingestion: VehicleIngestionService,
    pub analytics: AnalyticsService,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/v1/ingestion/meter", post(ingestion::ingest_meter))
        .route("/v1/ingestion/vehicle", post(ingestion::ingest_vehicle))
        .route(
            "/v1/analytics/performance/:vehicle_id",
            get(analytics::get_vehicle_performance),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
