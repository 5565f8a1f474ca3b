//! `/health` handlers.

use axum::extract::State;
use axum::Json;

use crate::services::health_service::HealthReport;
use crate::AppState;

/// GET /health/check
///
/// Always 200; a failing database shows up as `"status": "degraded"`.
pub async fn check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health.check().await)
}
