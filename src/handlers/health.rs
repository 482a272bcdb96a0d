use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;

use crate::models::HealthStatus;
use crate::routes::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "healthy".to_string(),
                database: "connected".to_string(),
                timestamp: Utc::now(),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "unhealthy".to_string(),
                database: "disconnected".to_string(),
                timestamp: Utc::now(),
                error: Some(e.to_string()),
            }),
        ),
    }
}
