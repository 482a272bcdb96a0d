use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::VehiclePerformance;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

pub async fn get_vehicle_performance(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    Query(params): Query<PerformanceQuery>,
) -> Result<Json<VehiclePerformance>> {
    let start = params
        .start_time
        .as_deref()
        .map(|raw| parse_bound(raw, "startTime"))
        .transpose()?;
    let end = params
        .end_time
        .as_deref()
        .map(|raw| parse_bound(raw, "endTime"))
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(AppError::Validation(
                "startTime must be before endTime".to_string(),
            ));
        }
    }

    let report = state
        .analytics
        .get_vehicle_performance(&vehicle_id, start, end)
        .await?;

    Ok(Json(report))
}

fn parse_bound(raw: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            AppError::Validation(format!("Invalid {} format. Use ISO8601 timestamp.", field))
        })
}
