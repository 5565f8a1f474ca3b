//! # Validation Module
//!
//! Input validation for the request-handling layer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  └── Type validation (deserialization of query/body)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Catalog sizes: present, positive, bounded                         │
//! │  ├── Requested amount: positive, under the configured ceiling          │
//! │  └── Identifiers: UUID / fingerprint shape                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (size > 0)                                                  │
//! │  └── UNIQUE active fingerprint                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The optimizer itself never rejects an amount: zero or negative amounts are
//! answered with an empty combination. Rejecting them is an API decision.

use crate::error::ValidationError;
use crate::fingerprint::is_fingerprint;
use crate::types::PackSize;
use crate::{MAX_CATALOG_SIZES, MAX_PACK_SIZE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates the sizes submitted for a new catalog.
///
/// ## Rules
/// - At least one size
/// - At most `MAX_CATALOG_SIZES` entries (duplicates count)
/// - Every size between 1 and `MAX_PACK_SIZE`
///
/// ## Returns
/// The sizes converted to [`PackSize`], in submission order.
///
/// ## Example
/// ```rust
/// use packulator_core::validation::validate_pack_sizes;
///
/// assert_eq!(validate_pack_sizes(&[500, 250]).unwrap(), vec![500, 250]);
/// assert!(validate_pack_sizes(&[]).is_err());
/// assert!(validate_pack_sizes(&[250, 0]).is_err());
/// assert!(validate_pack_sizes(&[-250]).is_err());
/// ```
pub fn validate_pack_sizes(sizes: &[i64]) -> ValidationResult<Vec<PackSize>> {
    if sizes.is_empty() {
        return Err(ValidationError::Required {
            field: "packs".to_string(),
        });
    }

    if sizes.len() > MAX_CATALOG_SIZES {
        return Err(ValidationError::TooLong {
            field: "packs".to_string(),
            max: MAX_CATALOG_SIZES,
        });
    }

    sizes
        .iter()
        .map(|&size| {
            if size <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "pack size".to_string(),
                });
            }
            if size > MAX_PACK_SIZE {
                return Err(ValidationError::OutOfRange {
                    field: "pack size".to_string(),
                    min: 1,
                    max: MAX_PACK_SIZE,
                });
            }
            Ok(size as PackSize)
        })
        .collect()
}

/// Rejects sizes larger than `max`.
///
/// A deployment sets `max` to `max_search_bound - max_requested_amount`, so
/// every accepted amount stays inside the optimizer's search limit for the
/// registered catalog.
pub fn validate_largest_pack(sizes: &[PackSize], max: u64) -> ValidationResult<()> {
    if sizes.iter().any(|&size| size > max) {
        return Err(ValidationError::OutOfRange {
            field: "pack size".to_string(),
            min: 1,
            max: i64::try_from(max).unwrap_or(i64::MAX),
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a requested amount against the deployment's ceiling.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
pub fn validate_requested_amount(amount: i64, max: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount > max {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

/// Validates a catalog fingerprint query value.
pub fn validate_fingerprint(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if !is_fingerprint(value) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be 16 lowercase hex characters".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use packulator_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pack_sizes() {
        assert_eq!(
            validate_pack_sizes(&[250, 500, 1000]).unwrap(),
            vec![250, 500, 1000]
        );
        assert_eq!(validate_pack_sizes(&[100, 100]).unwrap(), vec![100, 100]);

        assert!(matches!(
            validate_pack_sizes(&[]),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_pack_sizes(&[250, 0]),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_pack_sizes(&[MAX_PACK_SIZE + 1]),
            Err(ValidationError::OutOfRange { .. })
        ));

        let too_many = vec![1; MAX_CATALOG_SIZES + 1];
        assert!(matches!(
            validate_pack_sizes(&too_many),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_largest_pack() {
        assert!(validate_largest_pack(&[250, 9_000_000], 9_000_000).is_ok());
        assert!(matches!(
            validate_largest_pack(&[250, 20_000_000], 9_000_000),
            Err(ValidationError::OutOfRange { max: 9_000_000, .. })
        ));
    }

    #[test]
    fn test_validate_requested_amount() {
        assert!(validate_requested_amount(1, 1000).is_ok());
        assert!(validate_requested_amount(1000, 1000).is_ok());

        assert!(validate_requested_amount(0, 1000).is_err());
        assert!(validate_requested_amount(-5, 1000).is_err());
        assert!(validate_requested_amount(1001, 1000).is_err());
    }

    #[test]
    fn test_validate_fingerprint() {
        assert!(validate_fingerprint("packs_hash", "415a075d1196b695").is_ok());
        assert!(matches!(
            validate_fingerprint("packs_hash", " "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_fingerprint("packs_hash", "xyz"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
