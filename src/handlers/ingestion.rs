use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{IngestionResponse, MeterSample, VehicleSample};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterTelemetryRequest {
    pub meter_id: String,
    pub kwh_consumed_ac: Decimal,
    pub voltage: Decimal,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTelemetryRequest {
    pub vehicle_id: String,
    pub soc: Decimal,
    pub kwh_delivered_dc: Decimal,
    pub battery_temp: Decimal,
    pub timestamp: String,
}

pub async fn ingest_meter(
    State(state): State<AppState>,
    Json(body): Json<MeterTelemetryRequest>,
) -> Result<(StatusCode, Json<IngestionResponse>)> {
    let sample = validate_meter_telemetry(body)?;
    let response = state.meter_ingestion.ingest(sample).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn ingest_vehicle(
    State(state): State<AppState>,
    Json(body): Json<VehicleTelemetryRequest>,
) -> Result<(StatusCode, Json<IngestionResponse>)> {
    let sample = validate_vehicle_telemetry(body)?;
    let response = state.vehicle_ingestion.ingest(sample).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

fn validate_meter_telemetry(body: MeterTelemetryRequest) -> Result<MeterSample> {
    if body.meter_id.trim().is_empty() {
        return Err(AppError::Validation("meterId is required".to_string()));
    }
    if body.kwh_consumed_ac < Decimal::ZERO {
        return Err(AppError::Validation(
            "kwhConsumedAc must be a positive number".to_string(),
        ));
    }
    if body.voltage < Decimal::ZERO {
        return Err(AppError::Validation(
            "voltage must be a positive number".to_string(),
        ));
    }
    let timestamp = parse_timestamp(&body.timestamp)?;

    Ok(MeterSample {
        meter_id: body.meter_id,
        kwh_consumed_ac: body.kwh_consumed_ac,
        voltage: body.voltage,
        timestamp,
    })
}

fn validate_vehicle_telemetry(body: VehicleTelemetryRequest) -> Result<VehicleSample> {
    if body.vehicle_id.trim().is_empty() {
        return Err(AppError::Validation("vehicleId is required".to_string()));
    }
    if body.soc < Decimal::ZERO || body.soc > Decimal::from(100) {
        return Err(AppError::Validation(
            "soc must be a number between 0 and 100".to_string(),
        ));
    }
    if body.kwh_delivered_dc < Decimal::ZERO {
        return Err(AppError::Validation(
            "kwhDeliveredDc must be a positive number".to_string(),
        ));
    }
    // batteryTemp may be any sign.
    let timestamp = parse_timestamp(&body.timestamp)?;

    Ok(VehicleSample {
        vehicle_id: body.vehicle_id,
        soc: body.soc,
        kwh_delivered_dc: body.kwh_delivered_dc,
        battery_temp: body.battery_temp,
        timestamp,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            AppError::Validation("timestamp must be a valid ISO8601 date string".to_string())
        })
}
