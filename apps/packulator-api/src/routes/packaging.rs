//! `/packaging` handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use packulator_core::ResultCombination;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PackagingQuery {
    pub amount: i64,
    pub packs_hash: String,
}

/// GET /packaging/number_of_packages?amount=&packs_hash=
pub async fn number_of_packages(
    State(state): State<AppState>,
    query: Result<Query<PackagingQuery>, QueryRejection>,
) -> ApiResult<Json<ResultCombination>> {
    let Query(query) = query?;
    let combination = state
        .packaging
        .number_of_packages(query.amount, &query.packs_hash)
        .await?;
    Ok(Json(combination))
}
