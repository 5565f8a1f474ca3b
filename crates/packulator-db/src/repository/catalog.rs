//! # Catalog Repository
//!
//! Database operations for registered pack catalogs.
//!
//! ## Key Operations
//! - Idempotent registration (same active multiset → same catalog)
//! - Lookup by id or by fingerprint
//! - Precomputed profile retrieval
//! - Soft delete
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    register([500, 250, 1000])                           │
//! │                                                                         │
//! │  Catalog::new ──► fingerprint "…"                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  active catalog with this fingerprint?                                 │
//! │       ├── yes ──► return it (created = false)                          │
//! │       │                                                                 │
//! │       ▼ no                                                              │
//! │  enumerate_profiles (skipped above MAX_PROFILE_SIZES distinct sizes)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │    INSERT catalogs                                                     │
//! │    INSERT catalog_items    (one row per size, duplicates kept)         │
//! │    INSERT catalog_profiles (one row per subset)                        │
//! │  COMMIT                                                                │
//! │       │                                                                 │
//! │       └── UNIQUE violation? a concurrent registration won:             │
//! │           return that one instead                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use packulator_core::{enumerate_profiles, Catalog, CombinationProfile, PackSize};

/// Outcome of [`CatalogRepository::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The active catalog for the submitted multiset.
    pub catalog: Catalog,

    /// Number of profiles stored for it.
    pub profile_count: usize,

    /// False when an existing active catalog was returned.
    pub created: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogRow {
    id: String,
    version_hash: String,
    total_amount: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    catalog_id: String,
    size: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    total_amount: i64,
    sizes: String,
}

impl CatalogRow {
    fn into_catalog(self, sizes: Vec<PackSize>) -> DbResult<Catalog> {
        Ok(Catalog {
            total_amount: to_unsigned("total_amount", self.total_amount)?,
            id: self.id,
            version_hash: self.version_hash,
            sizes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProfileRow {
    fn into_profile(self) -> DbResult<CombinationProfile> {
        Ok(CombinationProfile {
            sizes: serde_json::from_str(&self.sizes)?,
            total_amount: to_unsigned("profile total", self.total_amount)?,
        })
    }
}

fn to_unsigned(what: &str, value: i64) -> DbResult<u64> {
    u64::try_from(value).map_err(|_| DbError::Internal(format!("negative {what}: {value}")))
}

fn to_signed(what: &str, value: u64) -> DbResult<i64> {
    i64::try_from(value).map_err(|_| DbError::Internal(format!("{what} out of range: {value}")))
}

const CATALOG_COLUMNS: &str = "id, version_hash, total_amount, created_at, updated_at";

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// let registration = repo.register(vec![250, 500, 1000]).await?;
/// let catalog = repo.get_by_hash(&registration.catalog.version_hash).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a multiset of already validated sizes.
    ///
    /// Returns the existing active catalog when the same multiset (in any
    /// order) is registered again. Profiles are precomputed for catalogs with
    /// at most `MAX_PROFILE_SIZES` distinct sizes; larger catalogs are stored
    /// without them.
    pub async fn register(&self, sizes: Vec<PackSize>) -> DbResult<Registration> {
        let candidate = Catalog::new(sizes);

        if let Some(existing) = self.find_by_hash(&candidate.version_hash).await? {
            debug!(id = %existing.id, hash = %existing.version_hash, "Catalog already registered");
            return self.existing_registration(existing).await;
        }

        let profiles = match enumerate_profiles(&candidate.sizes) {
            Ok(profiles) => profiles,
            Err(err) => {
                warn!(hash = %candidate.version_hash, error = %err, "Skipping profile precomputation");
                Vec::new()
            }
        };

        match self.insert(&candidate, &profiles).await {
            Ok(()) => {
                info!(
                    id = %candidate.id,
                    hash = %candidate.version_hash,
                    sizes = candidate.sizes.len(),
                    profiles = profiles.len(),
                    "Catalog registered"
                );
                Ok(Registration {
                    catalog: candidate,
                    profile_count: profiles.len(),
                    created: true,
                })
            }
            Err(err) if err.is_unique_violation() => {
                debug!(hash = %candidate.version_hash, "Lost registration race, returning winner");
                let existing = self.get_by_hash(&candidate.version_hash).await?;
                self.existing_registration(existing).await
            }
            Err(err) => Err(err),
        }
    }

    async fn existing_registration(&self, catalog: Catalog) -> DbResult<Registration> {
        let profile_count = self.profile_count(&catalog.id).await?;
        Ok(Registration {
            catalog,
            profile_count,
            created: false,
        })
    }

    /// Inserts a catalog with its items and profiles in one transaction.
    ///
    /// ## Errors
    /// `UniqueViolation` when an active catalog already has this fingerprint.
    pub async fn insert(&self, catalog: &Catalog, profiles: &[CombinationProfile]) -> DbResult<()> {
        debug!(id = %catalog.id, hash = %catalog.version_hash, "Inserting catalog");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            "INSERT INTO catalogs (id, version_hash, total_amount, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&catalog.id)
        .bind(&catalog.version_hash)
        .bind(to_signed("total_amount", catalog.total_amount)?)
        .bind(catalog.created_at)
        .bind(catalog.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, catalog.version_hash.as_str())
            }
            other => other,
        })?;

        for (position, size) in catalog.sizes.iter().enumerate() {
            sqlx::query("INSERT INTO catalog_items (catalog_id, position, size) VALUES (?1, ?2, ?3)")
                .bind(&catalog.id)
                .bind(position as i64)
                .bind(to_signed("size", *size)?)
                .execute(&mut *tx)
                .await?;
        }

        for (position, profile) in profiles.iter().enumerate() {
            sqlx::query(
                "INSERT INTO catalog_profiles (catalog_id, position, total_amount, sizes)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&catalog.id)
            .bind(position as i64)
            .bind(to_signed("profile total", profile.total_amount)?)
            .bind(serde_json::to_string(&profile.sizes)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Gets an active catalog by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Catalog> {
        debug!(id = %id, "Getting catalog by id");

        let row = sqlx::query_as::<_, CatalogRow>(&format!(
            "SELECT {CATALOG_COLUMNS} FROM catalogs WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Catalog", id))?;

        self.with_items(row).await
    }

    /// Gets the active catalog with this fingerprint.
    pub async fn get_by_hash(&self, version_hash: &str) -> DbResult<Catalog> {
        self.find_by_hash(version_hash)
            .await?
            .ok_or_else(|| DbError::not_found("Catalog", version_hash))
    }

    /// Finds the active catalog with this fingerprint, if any.
    pub async fn find_by_hash(&self, version_hash: &str) -> DbResult<Option<Catalog>> {
        debug!(hash = %version_hash, "Finding catalog by hash");

        let row = sqlx::query_as::<_, CatalogRow>(&format!(
            "SELECT {CATALOG_COLUMNS} FROM catalogs WHERE version_hash = ?1 AND deleted_at IS NULL"
        ))
        .bind(version_hash)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.with_items(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists active catalogs in registration order.
    pub async fn list(&self) -> DbResult<Vec<Catalog>> {
        let rows = sqlx::query_as::<_, CatalogRow>(&format!(
            "SELECT {CATALOG_COLUMNS} FROM catalogs WHERE deleted_at IS NULL ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, ItemRow>(
            "SELECT i.catalog_id, i.size
             FROM catalog_items i
             INNER JOIN catalogs c ON c.id = i.catalog_id
             WHERE c.deleted_at IS NULL
             ORDER BY i.catalog_id, i.position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sizes_by_catalog: HashMap<String, Vec<PackSize>> = HashMap::new();
        for item in items {
            sizes_by_catalog
                .entry(item.catalog_id)
                .or_default()
                .push(to_unsigned("size", item.size)?);
        }

        let catalogs = rows
            .into_iter()
            .map(|row| {
                let sizes = sizes_by_catalog.remove(&row.id).unwrap_or_default();
                row.into_catalog(sizes)
            })
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = catalogs.len(), "Listed catalogs");
        Ok(catalogs)
    }

    /// Returns the precomputed profiles of the active catalog with this
    /// fingerprint, ordered by total then member count.
    pub async fn profiles(&self, version_hash: &str) -> DbResult<Vec<CombinationProfile>> {
        let catalog_id: String = sqlx::query_scalar(
            "SELECT id FROM catalogs WHERE version_hash = ?1 AND deleted_at IS NULL",
        )
        .bind(version_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Catalog", version_hash))?;

        sqlx::query_as::<_, ProfileRow>(
            "SELECT total_amount, sizes FROM catalog_profiles
             WHERE catalog_id = ?1
             ORDER BY position",
        )
        .bind(&catalog_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ProfileRow::into_profile)
        .collect()
    }

    /// Counts active catalogs.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalogs WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Soft-deletes an active catalog.
    ///
    /// The row stays for history; lookups stop seeing it and the fingerprint
    /// becomes free for a new registration.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE catalogs SET deleted_at = ?1, updated_at = ?1
             WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog", id));
        }

        info!(id = %id, "Catalog deleted");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn with_items(&self, row: CatalogRow) -> DbResult<Catalog> {
        let sizes = sqlx::query_scalar::<_, i64>(
            "SELECT size FROM catalog_items WHERE catalog_id = ?1 ORDER BY position",
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|size| to_unsigned("size", size))
        .collect::<DbResult<Vec<_>>>()?;

        row.into_catalog(sizes)
    }

    async fn profile_count(&self, catalog_id: &str) -> DbResult<usize> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM catalog_profiles WHERE catalog_id = ?1")
                .bind(catalog_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count as usize)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
