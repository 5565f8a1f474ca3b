//! Catalog management.
//!
//! Validates identifiers and sizes, then delegates to the catalog repository.

use tracing::info;

use packulator_core::validation::{
    validate_fingerprint, validate_largest_pack, validate_pack_sizes, validate_uuid,
};
use packulator_core::{Catalog, CombinationProfile};
use packulator_db::{Database, Registration};

use crate::config::ApiConfig;
use crate::error::ApiResult;

/// Catalog service implementation.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
    max_pack_size: u64,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(db: Database, config: &ApiConfig) -> Self {
        CatalogService {
            db,
            max_pack_size: config.max_pack_size(),
        }
    }

    /// Registers a catalog, or returns the active one for the same multiset.
    pub async fn create(&self, packs: &[i64]) -> ApiResult<Registration> {
        let sizes = validate_pack_sizes(packs)?;
        validate_largest_pack(&sizes, self.max_pack_size)?;
        let registration = self.db.catalogs().register(sizes).await?;

        info!(
            id = %registration.catalog.id,
            hash = %registration.catalog.version_hash,
            created = registration.created,
            "Catalog create handled"
        );

        Ok(registration)
    }

    pub async fn list(&self) -> ApiResult<Vec<Catalog>> {
        Ok(self.db.catalogs().list().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<Catalog> {
        validate_uuid(id)?;
        Ok(self.db.catalogs().get_by_id(id).await?)
    }

    pub async fn get_by_hash(&self, hash: &str) -> ApiResult<Catalog> {
        validate_fingerprint("hash", hash)?;
        Ok(self.db.catalogs().get_by_hash(hash).await?)
    }

    /// Precomputed profiles of the active catalog with this fingerprint.
    pub async fn profiles(&self, hash: &str) -> ApiResult<Vec<CombinationProfile>> {
        validate_fingerprint("hash", hash)?;
        Ok(self.db.catalogs().profiles(hash).await?)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        validate_uuid(id)?;
        self.db.catalogs().soft_delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use packulator_db::DbConfig;

    async fn service() -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogService::new(db, &ApiConfig::default())
    }

    #[tokio::test]
    async fn test_create_validates_sizes() {
        let service = service().await;

        assert!(matches!(service.create(&[]).await, Err(ApiError::BadRequest(_))));
        assert!(matches!(service.create(&[250, -1]).await, Err(ApiError::BadRequest(_))));

        let registration = service.create(&[500, 250]).await.unwrap();
        assert_eq!(registration.catalog.sizes, vec![250, 500]);
        assert_eq!(registration.profile_count, 3);
    }

    #[tokio::test]
    async fn test_create_rejects_sizes_past_search_limit() {
        let service = service().await;

        assert!(matches!(
            service.create(&[250, 20_000_000]).await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(service.list().await.unwrap().is_empty());
        assert!(service.create(&[250, 9_000_000]).await.is_ok());
    }

    #[tokio::test]
    async fn test_lookups_validate_identifiers() {
        let service = service().await;

        assert!(matches!(service.get_by_id("nope").await, Err(ApiError::BadRequest(_))));
        assert!(matches!(service.get_by_hash("NOPE").await, Err(ApiError::BadRequest(_))));
        assert!(matches!(
            service.get_by_hash("0123456789abcdef").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            service.delete("550e8400-e29b-41d4-a716-446655440000").await,
            Err(ApiError::NotFound(_))
        ));
    }
}
