pub mod analytics;
pub mod meter;
pub mod vehicle;

pub use analytics::{AnalyticsRepository, VehicleAggregates};
pub use meter::MeterRepository;
pub use vehicle::VehicleRepository;
