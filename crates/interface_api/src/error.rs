//! API error handling
//!
//! Domain errors cross the boundary with their stable machine-readable kind
//! and their message verbatim; the calling layer displays the message rather
//! than a generic failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_registry::RegistryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable kind
    pub error: String,
    /// Human-readable message, surfaced verbatim to the end user
    pub message: String,
}

/// HTTP status for a registry error kind
fn registry_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::PolicyNotFound(_) | RegistryError::RegistrationNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        RegistryError::AlreadyRegistered { .. } | RegistryError::AlreadyInitialized => {
            StatusCode::CONFLICT
        }
        RegistryError::InvalidAmount(_)
        | RegistryError::InvalidRate(_)
        | RegistryError::DuplicateTier(_)
        | RegistryError::InvalidDiscountTier(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistryError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_kind, message) = match &self {
            ApiError::Registry(err) => (registry_status(err), err.kind(), err.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
