pub mod aggregation;
pub mod analytics_service;
pub mod entity_service;
pub mod metrics;
pub mod pacing;
pub mod report_service;
pub mod selection;
