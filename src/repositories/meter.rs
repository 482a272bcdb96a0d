use crate::db::DbPool;
use crate::error::Result;
use crate::models::{MeterSample, MeterStatus};

#[derive(Clone)]
pub struct MeterRepository {
    pool: DbPool,
}

impl MeterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append the sample to history and overwrite the current status in a
    /// single transaction: both writes commit together or neither is
    /// visible. The status overwrite is unconditional, so an out-of-order
    /// sample rewinds the visible status while history stays correct.
    pub async fn insert_sample(&self, sample: &MeterSample) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO meter_history (meter_id, kwh_consumed_ac, voltage, ts)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&sample.meter_id)
        .bind(sample.kwh_consumed_ac)
        .bind(sample.voltage)
        .bind(sample.timestamp)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO meter_current_status (meter_id, kwh_consumed_ac, voltage, last_updated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (meter_id) DO UPDATE SET
                kwh_consumed_ac = EXCLUDED.kwh_consumed_ac,
                voltage = EXCLUDED.voltage,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(&sample.meter_id)
        .bind(sample.kwh_consumed_ac)
        .bind(sample.voltage)
        .bind(sample.timestamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn find_status(&self, meter_id: &str) -> Result<Option<MeterStatus>> {
        let status = sqlx::query_as::<_, MeterStatus>(
            r#"
            SELECT meter_id, kwh_consumed_ac, voltage, last_updated
            FROM meter_current_status
            WHERE meter_id = $1
            "#,
        )
        .bind(meter_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }
}
