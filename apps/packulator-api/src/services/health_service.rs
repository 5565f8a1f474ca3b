//! Health check service.
//!
//! Reports liveness for load balancers and monitoring.

use serde::{Deserialize, Serialize};
use tracing::warn;

use packulator_db::Database;

/// Health check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when a dependency is failing
    pub status: String,

    /// `ok` or `error`
    pub database: String,

    /// Crate version of the running binary
    pub version: String,
}

/// Health service implementation.
#[derive(Debug, Clone)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    /// Create a new health service.
    pub fn new(db: Database) -> Self {
        HealthService { db }
    }

    /// Check the health of the service and its database.
    pub async fn check(&self) -> HealthReport {
        let database_ok = self.db.health_check().await;
        if !database_ok {
            warn!("Health check: database unreachable");
        }

        HealthReport {
            status: if database_ok { "ok" } else { "degraded" }.to_string(),
            database: if database_ok { "ok" } else { "error" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
