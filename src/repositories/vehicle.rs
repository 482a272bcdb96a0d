use crate::db::DbPool;
use crate::error::Result;
use crate::models::{VehicleSample, VehicleStatus};

#[derive(Clone)]
pub struct VehicleRepository {
    pool: DbPool,
}

impl VehicleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// History append plus unconditional status overwrite, one transaction.
    /// Same last-write-wins policy as the meter side.
    pub async fn insert_sample(&self, sample: &VehicleSample) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO vehicle_history (vehicle_id, soc, kwh_delivered_dc, battery_temp, ts)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&sample.vehicle_id)
        .bind(sample.soc)
        .bind(sample.kwh_delivered_dc)
        .bind(sample.battery_temp)
        .bind(sample.timestamp)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO vehicle_current_status (vehicle_id, soc, kwh_delivered_dc, battery_temp, last_updated)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (vehicle_id) DO UPDATE SET
                soc = EXCLUDED.soc,
                kwh_delivered_dc = EXCLUDED.kwh_delivered_dc,
                battery_temp = EXCLUDED.battery_temp,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(&sample.vehicle_id)
        .bind(sample.soc)
        .bind(sample.kwh_delivered_dc)
        .bind(sample.battery_temp)
        .bind(sample.timestamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn find_status(&self, vehicle_id: &str) -> Result<Option<VehicleStatus>> {
        let status = sqlx::query_as::<_, VehicleStatus>(
            r#"
            SELECT vehicle_id, soc, kwh_delivered_dc, battery_temp, last_updated
            FROM vehicle_current_status
            WHERE vehicle_id = $1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }
}
