//! # Domain Types
//!
//! Core domain types used throughout Packulator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌──────────────────┐  │
//! │  │    Catalog      │   │ CombinationProfile  │   │ResultCombination │  │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ──────────────  │  │
//! │  │  id (UUID)      │   │  sizes (distinct)   │   │  size → count    │  │
//! │  │  version_hash   │   │  total_amount       │   │  {"250":1,...}   │  │
//! │  │  sizes          │   └─────────────────────┘   └──────────────────┘  │
//! │  │  total_amount   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every catalog has:
//! - `id`: UUID v4, one per registration
//! - `version_hash`: fingerprint of the size multiset, what requests use

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::fingerprint::canonicalize;

/// Capacity contributed by one unit of a pack. Always positive in a catalog.
pub type PackSize = u64;

// =============================================================================
// Catalog
// =============================================================================

/// A registered set of pack sizes.
///
/// Immutable once created. Registering a different multiset produces a new
/// catalog with a new fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Order-independent fingerprint of `sizes`.
    pub version_hash: String,

    /// Sum of every registered size.
    #[ts(type = "number")]
    pub total_amount: u64,

    /// Registered sizes, ascending, duplicates retained.
    #[ts(type = "Array<number>")]
    pub sizes: Vec<PackSize>,

    /// When the catalog was registered.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the catalog row was last touched.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a new catalog from already validated sizes.
    ///
    /// ## Example
    /// ```rust
    /// use packulator_core::Catalog;
    ///
    /// let catalog = Catalog::new(vec![500, 250]);
    /// assert_eq!(catalog.sizes, vec![250, 500]);
    /// assert_eq!(catalog.total_amount, 750);
    /// assert_eq!(catalog.version_hash.len(), 16);
    /// ```
    pub fn new(mut sizes: Vec<PackSize>) -> Self {
        sizes.sort_unstable();
        let now = Utc::now();

        Catalog {
            id: Uuid::new_v4().to_string(),
            version_hash: canonicalize(&sizes),
            total_amount: sizes.iter().sum(),
            sizes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the distinct sizes in ascending order.
    pub fn distinct_sizes(&self) -> Vec<PackSize> {
        let mut sizes = self.sizes.clone();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

// =============================================================================
// Combination Profile
// =============================================================================

/// A non-empty subset of a catalog's distinct sizes with its summed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CombinationProfile {
    /// Member sizes, ascending and distinct.
    #[ts(type = "Array<number>")]
    pub sizes: Vec<PackSize>,

    /// Sum of `sizes`.
    #[ts(type = "number")]
    pub total_amount: u64,
}

impl CombinationProfile {
    /// A profile holding a single size.
    pub fn singleton(size: PackSize) -> Self {
        CombinationProfile {
            sizes: vec![size],
            total_amount: size,
        }
    }

    /// This profile with `size` appended.
    ///
    /// Callers append sizes in ascending order, which keeps `sizes` sorted.
    pub fn extended(&self, size: PackSize) -> Self {
        let mut sizes = Vec::with_capacity(self.sizes.len() + 1);
        sizes.extend_from_slice(&self.sizes);
        sizes.push(size);

        CombinationProfile {
            sizes,
            total_amount: self.total_amount + size,
        }
    }

    /// Number of member sizes.
    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always false for profiles built by the enumerator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

// =============================================================================
// Result Combination
// =============================================================================

/// Pack size → number of packs of that size to ship.
///
/// ## Serialization
/// Serializes as a bare JSON object keyed by the decimal size:
/// ```json
/// {"250": 1, "500": 1}
/// ```
/// JSON renders the serde newtype as its inner map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultCombination(#[ts(type = "Record<string, number>")] BTreeMap<PackSize, u64>);

impl ResultCombination {
    /// The empty combination ("nothing to pack").
    pub fn empty() -> Self {
        ResultCombination(BTreeMap::new())
    }

    /// Adds `count` packs of `size`.
    pub(crate) fn add(&mut self, size: PackSize, count: u64) {
        *self.0.entry(size).or_insert(0) += count;
    }

    /// True when no packs are shipped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count for a size (zero when absent).
    pub fn count(&self, size: PackSize) -> u64 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    /// Iterates `(size, count)` pairs in ascending size order.
    pub fn iter(&self) -> impl Iterator<Item = (PackSize, u64)> + '_ {
        self.0.iter().map(|(size, count)| (*size, *count))
    }

    /// Total quantity shipped: Σ(size × count).
    pub fn total_shipped(&self) -> u64 {
        self.iter().map(|(size, count)| size * count).sum()
    }

    /// Total number of packs shipped.
    pub fn pack_count(&self) -> u64 {
        self.0.values().sum()
    }

    /// Amount shipped beyond `requested`.
    ///
    /// Negative when the combination does not cover the request.
    pub fn overshoot(&self, requested: i64) -> i64 {
        self.total_shipped() as i64 - requested
    }

    /// Consumes the combination into its map.
    pub fn into_inner(self) -> BTreeMap<PackSize, u64> {
        self.0
    }
}

impl From<BTreeMap<PackSize, u64>> for ResultCombination {
    fn from(map: BTreeMap<PackSize, u64>) -> Self {
        ResultCombination(map)
    }
}

impl<const N: usize> From<[(PackSize, u64); N]> for ResultCombination {
    fn from(pairs: [(PackSize, u64); N]) -> Self {
        ResultCombination(BTreeMap::from(pairs))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
