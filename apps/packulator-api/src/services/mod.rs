//! Service layer.
//!
//! Handlers stay thin: they extract and serialize, services validate input
//! and talk to the catalog store and the optimizer.

pub mod catalog_service;
pub mod health_service;
pub mod packaging_service;

pub use catalog_service::CatalogService;
pub use health_service::HealthService;
pub use packaging_service::PackagingService;
