//! # Packaging Calculation
//!
//! Resolves a catalog by fingerprint and runs the optimizer off the async
//! runtime.
//!
//! ## Execution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /packaging/number_of_packages?amount=12001&packs_hash=415a…       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate amount (1..=MAX_REQUESTED_AMOUNT) and fingerprint            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalogs().get_by_hash  ──► 404 when unknown or deleted               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  spawn_blocking(optimizer.compute(amount, sizes, &cancel))             │
//! │       │                                                                 │
//! │       ├── done within CALCULATION_TIMEOUT_MS ──► {"5000":2,...}        │
//! │       │                                                                 │
//! │       └── deadline passed ──► cancel.store(true) ──► 503               │
//! │           (the sweep sees the flag within CANCEL_CHECK_INTERVAL sums)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use packulator_core::validation::{validate_fingerprint, validate_requested_amount};
use packulator_core::{Optimizer, ResultCombination};
use packulator_db::Database;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Packaging service implementation.
#[derive(Debug, Clone)]
pub struct PackagingService {
    db: Database,
    optimizer: Optimizer,
    max_requested_amount: i64,
    timeout: Duration,
}

impl PackagingService {
    /// Create a new packaging service from the API config.
    pub fn new(db: Database, config: &ApiConfig) -> Self {
        PackagingService {
            db,
            optimizer: Optimizer::new(config.search_limits()),
            max_requested_amount: config.max_requested_amount,
            timeout: config.calculation_timeout,
        }
    }

    /// Computes the pack combination for `amount` with the catalog
    /// identified by `packs_hash`.
    pub async fn number_of_packages(
        &self,
        amount: i64,
        packs_hash: &str,
    ) -> ApiResult<ResultCombination> {
        validate_requested_amount(amount, self.max_requested_amount)?;
        validate_fingerprint("packs_hash", packs_hash)?;

        let catalog = self.db.catalogs().get_by_hash(packs_hash).await?;
        debug!(amount, hash = %packs_hash, sizes = ?catalog.sizes, "Calculating packaging");

        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);
        let optimizer = self.optimizer.clone();
        let sizes = catalog.sizes;

        let task = tokio::task::spawn_blocking(move || {
            optimizer.compute(amount, &sizes, worker_cancel.as_ref())
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => {
                let combination = result?;
                debug!(
                    amount,
                    packs = combination.pack_count(),
                    shipped = combination.total_shipped(),
                    "Packaging calculated"
                );
                Ok(combination)
            }
            Ok(Err(join_err)) => Err(ApiError::Internal(format!(
                "calculation task failed: {join_err}"
            ))),
            Err(_) => {
                cancel.store(true, Ordering::Relaxed);
                warn!(
                    amount,
                    hash = %packs_hash,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Calculation deadline exceeded"
                );
                Err(ApiError::Unavailable(format!(
                    "calculation exceeded {} ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
