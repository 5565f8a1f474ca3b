//! # packulator-core: Pure Pack Math for Packulator
//!
//! This crate decides which packs to ship. It contains the decision logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Packulator Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    packulator-api (Axum)                        │   │
//! │  │    /packs/create ── /packs/hash ── /packaging/number_of_packages│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ packulator-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌─────────────┐  ┌─────────────┐            │   │
//! │  │   │ fingerprint │  │ enumerator  │  │  optimizer  │            │   │
//! │  │   │ sizes → id  │  │ all subsets │  │ min waste   │            │   │
//! │  │   └─────────────┘  └─────────────┘  └─────────────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  packulator-db (Catalog Store)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fingerprint`] - Order-independent catalog identifiers
//! - [`enumerator`] - Every subset of a catalog with its total
//! - [`optimizer`] - Minimal overshoot, then minimal pack count
//! - [`types`] - Catalog, CombinationProfile, ResultCombination
//! - [`validation`] - Request-layer input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use packulator_core::{canonicalize, compute_combination};
//!
//! let sizes = [250, 500, 1000, 2000, 5000];
//! assert_eq!(canonicalize(&sizes), canonicalize(&[5000, 2000, 1000, 500, 250]));
//!
//! let result = compute_combination(251, &sizes).unwrap();
//! assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"500":1}"#);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod enumerator;
pub mod error;
pub mod fingerprint;
pub mod optimizer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use enumerator::enumerate_profiles;
pub use error::{CoreError, CoreResult, ValidationError};
pub use fingerprint::canonicalize;
pub use optimizer::{compute_combination, CancellationSignal, NeverCancelled, Optimizer, SearchLimits};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of sizes in one catalog registration (duplicates count).
pub const MAX_CATALOG_SIZES: usize = 32;

/// Largest single pack size accepted at registration.
pub const MAX_PACK_SIZE: i64 = 1_000_000_000;

/// Maximum distinct sizes the enumerator will expand (2¹² − 1 = 4095 profiles).
pub const MAX_PROFILE_SIZES: usize = 12;

/// Default ceiling for `requested + max_size` in the optimizer.
///
/// 10M slots × 8 bytes ≈ 80 MB of state per calculation.
pub const DEFAULT_MAX_SEARCH_BOUND: u64 = 10_000_000;
