//! `/packs` handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use packulator_core::{Catalog, CombinationProfile};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePacksRequest {
    pub packs: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePacksResponse {
    pub id: String,
    pub version_hash: String,
    pub profile_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct HashQuery {
    pub hash: String,
}

/// POST /packs/create
///
/// Registering an already active multiset returns the existing catalog.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreatePacksRequest>, JsonRejection>,
) -> ApiResult<Json<CreatePacksResponse>> {
    let Json(body) = body?;
    let registration = state.catalogs.create(&body.packs).await?;

    Ok(Json(CreatePacksResponse {
        id: registration.catalog.id,
        version_hash: registration.catalog.version_hash,
        profile_count: registration.profile_count,
    }))
}

/// GET /packs/list
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Catalog>>> {
    Ok(Json(state.catalogs.list().await?))
}

/// GET /packs/id?id=
pub async fn get_by_id(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Catalog>> {
    let Query(query) = query?;
    Ok(Json(state.catalogs.get_by_id(&query.id).await?))
}

/// GET /packs/hash?hash=
pub async fn get_by_hash(
    State(state): State<AppState>,
    query: Result<Query<HashQuery>, QueryRejection>,
) -> ApiResult<Json<Catalog>> {
    let Query(query) = query?;
    Ok(Json(state.catalogs.get_by_hash(&query.hash).await?))
}

/// GET /packs/profiles?hash=
pub async fn profiles(
    State(state): State<AppState>,
    query: Result<Query<HashQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CombinationProfile>>> {
    let Query(query) = query?;
    Ok(Json(state.catalogs.profiles(&query.hash).await?))
}

/// DELETE /packs/delete?id=
pub async fn delete(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<StatusCode> {
    let Query(query) = query?;
    state.catalogs.delete(&query.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
