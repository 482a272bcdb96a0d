use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One validated meter reading. History rows are append-only and never
/// mutated after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterSample {
    pub meter_id: String,
    pub kwh_consumed_ac: Decimal,
    pub voltage: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// One validated vehicle reading. `soc` is a percentage in [0, 100];
/// `battery_temp` may be negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSample {
    pub vehicle_id: String,
    pub soc: Decimal,
    pub kwh_delivered_dc: Decimal,
    pub battery_temp: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Latest-known snapshot for a meter, one row per meter_id. Reflects the
/// most recently ingested sample, by ingestion order rather than by
/// comparing timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MeterStatus {
    pub meter_id: String,
    pub kwh_consumed_ac: Decimal,
    pub voltage: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// Latest-known snapshot for a vehicle, one row per vehicle_id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatus {
    pub vehicle_id: String,
    pub soc: Decimal,
    pub kwh_delivered_dc: Decimal,
    pub battery_temp: Decimal,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Derived charging performance report for one vehicle over a time window.
/// Not persisted. Energies are rounded to 3 decimal places, the efficiency
/// ratio to 4 and the average battery temperature to 2, half-up, at this
/// boundary only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePerformance {
    pub vehicle_id: String,
    pub time_range: TimeRange,
    pub total_energy_consumed_ac: Decimal,
    pub total_energy_delivered_dc: Decimal,
    pub efficiency_ratio: Decimal,
    pub average_battery_temp: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
