use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use crate::db::DbPool;
use crate::error::Result;

/// Aggregates over vehicle history for one window. NULL aggregates (no rows
/// in range) come back as zero.
#[derive(Debug, Clone, Copy)]
pub struct VehicleAggregates {
    pub total_kwh_delivered_dc: Decimal,
    pub average_battery_temp: Decimal,
}

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: DbPool,
}

impl AnalyticsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// First mapping for the vehicle, by insertion id. Duplicate mappings
    /// are tolerated; the lowest id wins.
    pub async fn find_meter_mapping(&self, vehicle_id: &str) -> Result<Option<String>> {
        let meter_id = sqlx::query_scalar::<_, String>(
            r#"
            SELECT meter_id
            FROM meter_vehicle_mapping
            WHERE vehicle_id = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(meter_id)
    }

    /// Total AC energy drawn at the meter, both window bounds inclusive.
    pub async fn sum_ac_consumption(
        &self,
        meter_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(kwh_consumed_ac)
            FROM meter_history
            WHERE meter_id = $1
              AND ts >= $2
              AND ts <= $3
            "#,
        )
        .bind(meter_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    /// Total DC energy delivered and average battery temperature, both
    /// window bounds inclusive.
    pub async fn vehicle_aggregates(
        &self,
        vehicle_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<VehicleAggregates> {
        let row = sqlx::query(
            r#"
            SELECT SUM(kwh_delivered_dc) AS total_kwh_delivered_dc,
                   AVG(battery_temp) AS average_battery_temp
            FROM vehicle_history
            WHERE vehicle_id = $1
              AND ts >= $2
              AND ts <= $3
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        let total_kwh_delivered_dc: Option<Decimal> = row.get("total_kwh_delivered_dc");
        let average_battery_temp: Option<Decimal> = row.get("average_battery_temp");

        Ok(VehicleAggregates {
            total_kwh_delivered_dc: total_kwh_delivered_dc.unwrap_or(Decimal::ZERO),
            average_battery_temp: average_battery_temp.unwrap_or(Decimal::ZERO),
        })
    }
}
