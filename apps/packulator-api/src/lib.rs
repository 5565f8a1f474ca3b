//! # Packulator API
//!
//! HTTP/JSON server for catalog management and pack calculations.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Packulator API                                  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌──────────────────────┐  ┌────────────────────┐  │
//! │  │ CatalogService │  │  PackagingService    │  │  HealthService     │  │
//! │  │                │  │                      │  │                    │  │
//! │  │ • create       │  │ • number_of_packages │  │ • check            │  │
//! │  │ • list / get   │  │   (spawn_blocking +  │  │                    │  │
//! │  │ • profiles     │  │    deadline)         │  │                    │  │
//! │  │ • delete       │  │                      │  │                    │  │
//! │  └───────┬────────┘  └──────────┬───────────┘  └─────────┬──────────┘  │
//! │          │                      │                        │             │
//! │  ┌───────▼──────────────────────▼────────────────────────▼──────────┐  │
//! │  │        packulator-db (SQLite)        packulator-core (math)       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]; every setting comes from an environment
//! variable with a default.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use axum::Router;
use packulator_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

use crate::services::{CatalogService, HealthService, PackagingService};

/// Shared application state. Cheap to clone: every field shares one pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalogs: CatalogService,
    pub packaging: PackagingService,
    pub health: HealthService,
}

impl AppState {
    pub fn new(db: Database, config: &ApiConfig) -> Self {
        AppState {
            catalogs: CatalogService::new(db.clone(), config),
            packaging: PackagingService::new(db.clone(), config),
            health: HealthService::new(db),
        }
    }
}

/// Builds the full application.
pub fn app(db: Database, config: &ApiConfig) -> Router {
    routes::router(AppState::new(db, config))
}
