//! # API Error Types
//!
//! Maps catalog store and pack math errors to HTTP responses.
//!
//! ## Status Mapping
//! ```text
//! ┌──────────────────────────────────────────────┬────────┐
//! │ ValidationError, bad query/body              │  400   │
//! │ DbError::NotFound                            │  404   │
//! │ CoreError::SearchSpaceTooLarge               │  422   │
//! │ CoreError::Cancelled, calculation timed out  │  503   │
//! │ everything else                              │  500   │
//! └──────────────────────────────────────────────┴────────┘
//! ```
//!
//! Every error body has the same shape:
//! `{"error": {"code": 404, "message": "Catalog not found: …"}}`

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use packulator_core::{CoreError, ValidationError};
use packulator_db::DbError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// HTTP status code, repeated for clients that only see the body.
    pub code: u16,
    /// Human-readable error message.
    pub message: String,
}

/// API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be parsed or failed validation (400).
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// The amount is valid but too large to compute (422).
    #[error("{0}")]
    Unprocessable(String),

    /// The calculation was cancelled or ran past its deadline (503).
    #[error("{0}")]
    Unavailable(String),

    /// Internal server error (500). Logged, never returned verbatim.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "internal server error");
                "An internal error occurred".to_string()
            }
            ApiError::Unavailable(detail) => {
                warn!(error = %detail, "calculation unavailable");
                detail.clone()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: status.as_u16(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            too_large @ CoreError::SearchSpaceTooLarge { .. } => {
                ApiError::Unprocessable(too_large.to_string())
            }
            cancelled @ CoreError::Cancelled => ApiError::Unavailable(cancelled.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            not_found @ DbError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type for handlers and services.
pub type ApiResult<T> = Result<T, ApiError>;
