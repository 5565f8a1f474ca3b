//! # Error Types
//!
//! Domain-specific error types for packulator-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  packulator-core errors (this file)                                    │
//! │  ├── CoreError        - Computation failures                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  packulator-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What clients see (status + JSON body)          │
//! │                                                                         │
//! │  Flow: ValidationError | CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! A requested amount of zero or less, or an empty size set, is a valid
//! request for "nothing to pack". The optimizer answers it with an empty
//! combination.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core computation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The optimizer's state array would exceed the configured ceiling.
    ///
    /// ## When This Occurs
    /// - `requested + max_size` is larger than `SearchLimits::max_search_bound`
    /// - `requested + max_size` overflows `u64`
    #[error("Search space for amount {requested} with largest pack {max_size} exceeds limit {limit}")]
    SearchSpaceTooLarge {
        requested: i64,
        max_size: u64,
        limit: u64,
    },

    /// The caller raised its cancellation signal while the sweep was running.
    #[error("Calculation cancelled")]
    Cancelled,

    /// No terminal state was reachable.
    ///
    /// With a positive amount and at least one positive size this cannot
    /// happen: the smallest size repeated enough times always lands in the
    /// terminal window. Deterministic, so callers must not retry it.
    #[error("Could not find a valid combination for amount {requested}")]
    NoReachableCombination { requested: i64 },

    /// Too many distinct sizes to enumerate every profile.
    #[error("Cannot enumerate profiles for {count} distinct sizes (max {max})")]
    TooManyDistinctSizes { count: usize, max: usize },
}

impl CoreError {
    /// True when the error came from the caller's cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the outer layers before any core computation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must have at most {max} entries")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed fingerprint).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
