pub mod analytics;
pub mod ingestion;

pub use analytics::AnalyticsService;
pub use ingestion::{MeterIngestionService, VehicleIngestionService};
