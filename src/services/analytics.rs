use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::Result;
use crate::models::{TimeRange, VehiclePerformance};
use crate::repositories::AnalyticsRepository;

const ENERGY_DP: u32 = 3;
const RATIO_DP: u32 = 4;
const TEMP_DP: u32 = 2;

#[derive(Clone)]
pub struct AnalyticsService {
    repository: AnalyticsRepository,
}

impl AnalyticsService {
    pub fn new(repository: AnalyticsRepository) -> Self {
        Self { repository }
    }

    /// Charging performance for one vehicle over a time window: AC energy
    /// drawn at the mapped meter versus DC energy delivered to the vehicle.
    ///
    /// A vehicle without a meter mapping is a degraded result, not an
    /// error: the AC total and efficiency ratio are 0. The AC and DC-side
    /// aggregates run concurrently and are not snapshot together, so under
    /// concurrent ingestion the two halves may reflect slightly different
    /// points in time.
    pub async fn get_vehicle_performance(
        &self,
        vehicle_id: &str,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<VehiclePerformance> {
        let (start, end) = resolve_window(start_time, end_time, Utc::now());

        let mapping = self.repository.find_meter_mapping(vehicle_id).await?;
        if mapping.is_none() {
            tracing::warn!(
                "No meter mapping found for vehicle {}, AC consumption will be 0",
                vehicle_id
            );
        }

        let ac_side = async {
            match mapping.as_deref() {
                Some(meter_id) => self.repository.sum_ac_consumption(meter_id, start, end).await,
                None => Ok(Decimal::ZERO),
            }
        };
        let vehicle_side = self.repository.vehicle_aggregates(vehicle_id, start, end);

        let (total_energy_consumed_ac, vehicle_aggregates) =
            tokio::try_join!(ac_side, vehicle_side)?;

        let efficiency_ratio = efficiency_ratio(
            total_energy_consumed_ac,
            vehicle_aggregates.total_kwh_delivered_dc,
        );

        Ok(VehiclePerformance {
            vehicle_id: vehicle_id.to_string(),
            time_range: TimeRange { start, end },
            total_energy_consumed_ac: round_half_up(total_energy_consumed_ac, ENERGY_DP),
            total_energy_delivered_dc: round_half_up(
                vehicle_aggregates.total_kwh_delivered_dc,
                ENERGY_DP,
            ),
            efficiency_ratio: round_half_up(efficiency_ratio, RATIO_DP),
            average_battery_temp: round_half_up(vehicle_aggregates.average_battery_temp, TEMP_DP),
        })
    }
}

/// Defaults are applied per bound: a missing end becomes now, a missing
/// start becomes end minus 24 hours. The bounds do not otherwise couple.
fn resolve_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = end.unwrap_or(now);
    let start = start.unwrap_or_else(|| end - Duration::hours(24));
    (start, end)
}

/// DC delivered over AC consumed; 0 by policy when nothing was consumed.
fn efficiency_ratio(total_ac: Decimal, total_dc: Decimal) -> Decimal {
    if total_ac > Decimal::ZERO {
        total_dc / total_ac
    } else {
        Decimal::ZERO
    }
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
