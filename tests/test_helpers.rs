use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

pub type TestDbPool = Pool<Postgres>;

/// Creates a test database connection pool
pub async fn create_test_pool(database_url: &str) -> Result<TestDbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Sets up the five telemetry tables used by the service
pub async fn setup_test_schema(pool: &TestDbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meter_history (
            id BIGSERIAL PRIMARY KEY,
            meter_id TEXT NOT NULL,
            kwh_consumed_ac NUMERIC NOT NULL,
            voltage NUMERIC NOT NULL,
            ts TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_meter_history_meter_ts ON meter_history (meter_id, ts)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meter_current_status (
            meter_id TEXT PRIMARY KEY,
            kwh_consumed_ac NUMERIC NOT NULL,
            voltage NUMERIC NOT NULL,
            last_updated TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicle_history (
            id BIGSERIAL PRIMARY KEY,
            vehicle_id TEXT NOT NULL,
            soc NUMERIC NOT NULL,
            kwh_delivered_dc NUMERIC NOT NULL,
            battery_temp NUMERIC NOT NULL,
            ts TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_vehicle_history_vehicle_ts ON vehicle_history (vehicle_id, ts)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicle_current_status (
            vehicle_id TEXT PRIMARY KEY,
            soc NUMERIC NOT NULL,
            kwh_delivered_dc NUMERIC NOT NULL,
            battery_temp NUMERIC NOT NULL,
            last_updated TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meter_vehicle_mapping (
            id BIGSERIAL PRIMARY KEY,
            vehicle_id TEXT NOT NULL,
            meter_id TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Unique device id so concurrently running tests do not interfere
pub fn unique_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    format!("{}-{}", prefix, rng.gen::<u32>())
}

pub async fn insert_mapping(
    pool: &TestDbPool,
    vehicle_id: &str,
    meter_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO meter_vehicle_mapping (vehicle_id, meter_id) VALUES ($1, $2)")
        .bind(vehicle_id)
        .bind(meter_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn count_meter_history(pool: &TestDbPool, meter_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM meter_history WHERE meter_id = $1")
        .bind(meter_id)
        .fetch_one(pool)
        .await
}

pub async fn count_vehicle_history(
    pool: &TestDbPool,
    vehicle_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM vehicle_history WHERE vehicle_id = $1")
        .bind(vehicle_id)
        .fetch_one(pool)
        .await
}

pub async fn count_meter_status_rows(
    pool: &TestDbPool,
    meter_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM meter_current_status WHERE meter_id = $1")
        .bind(meter_id)
        .fetch_one(pool)
        .await
}

/// Raw history insert for seeding analytics scenarios without going
/// through the ingestion path
pub async fn seed_meter_history(
    pool: &TestDbPool,
    meter_id: &str,
    kwh_consumed_ac: Decimal,
    ts: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO meter_history (meter_id, kwh_consumed_ac, voltage, ts) VALUES ($1, $2, 230, $3)",
    )
    .bind(meter_id)
    .bind(kwh_consumed_ac)
    .bind(ts)
    .execute(pool)
    .await?;

    Ok(())
}

/// Installs a trigger that rejects status writes for meter ids with the
/// given prefix, to force a mid-transaction failure
pub async fn install_status_failure_trigger(
    pool: &TestDbPool,
    prefix: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        r#"
        CREATE OR REPLACE FUNCTION reject_test_status_writes() RETURNS trigger AS $$
        BEGIN
            IF NEW.meter_id LIKE '{}%' THEN
                RAISE EXCEPTION 'simulated status write failure';
            END IF;
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql
        "#,
        prefix
    ))
    .execute(pool)
    .await?;

    sqlx::query("DROP TRIGGER IF EXISTS reject_test_status ON meter_current_status")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER reject_test_status
        BEFORE INSERT OR UPDATE ON meter_current_status
        FOR EACH ROW EXECUTE FUNCTION reject_test_status_writes()
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove_status_failure_trigger(pool: &TestDbPool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TRIGGER IF EXISTS reject_test_status ON meter_current_status")
        .execute(pool)
        .await?;

    Ok(())
}
