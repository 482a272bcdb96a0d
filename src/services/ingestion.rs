use crate::error::Result;
use crate::models::{IngestionResponse, MeterSample, VehicleSample};
use crate::repositories::{MeterRepository, VehicleRepository};

/// Records one meter sample: history append plus status overwrite, atomic.
/// Input is already validated at the handler boundary; no re-validation
/// happens here.
#[derive(Clone)]
pub struct MeterIngestionService {
    repository: MeterRepository,
}

impl MeterIngestionService {
    pub fn new(repository: MeterRepository) -> Self {
        Self { repository }
    }

    pub async fn ingest(&self, sample: MeterSample) -> Result<IngestionResponse> {
        self.repository.insert_sample(&sample).await?;

        tracing::debug!("Ingested meter sample for {}", sample.meter_id);

        Ok(IngestionResponse {
            success: true,
            meter_id: Some(sample.meter_id),
            vehicle_id: None,
            message: "Meter data ingested successfully".to_string(),
        })
    }
}

/// Vehicle-side counterpart of [`MeterIngestionService`].
#[derive(Clone)]
pub struct VehicleIngestionService {
    repository: VehicleRepository,
}

impl VehicleIngestionService {
    pub fn new(repository: VehicleRepository) -> Self {
        Self { repository }
    }

    pub async fn ingest(&self, sample: VehicleSample) -> Result<IngestionResponse> {
        self.repository.insert_sample(&sample).await?;

        tracing::debug!("Ingested vehicle sample for {}", sample.vehicle_id);

        Ok(IngestionResponse {
            success: true,
            meter_id: None,
            vehicle_id: Some(sample.vehicle_id),
            message: "Vehicle data ingested successfully".to_string(),
        })
    }
}
