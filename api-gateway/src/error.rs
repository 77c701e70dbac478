//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// API error response
///
/// The request ID travels in the `x-request-id` header and on the request span.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Common(#[from] common::error::Error),
}

impl ApiError {
    /// Status code, error code and optional details for this error
    fn parts(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                common::error::Error::ValidationError(_) => (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    None
                ),

                // Server errors (5xx)
                common::error::Error::ConfigurationError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    None
                ),
                common::error::Error::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    None
                ),
                common::error::Error::Database(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(serde_json::json!({
                        "db_error": e.to_string(),
                        "code": e.as_database_error().and_then(|dbe| dbe.code().map(|c| c.to_string())),
                    }))
                ),
                common::error::Error::Migration(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "migration_error",
                    None
                ),
                common::error::Error::DecimalError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "decimal_error",
                    None
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = self.parts();

        if status.is_server_error() {
            tracing::error!("API Error: {:?}", &self);
        } else {
            tracing::debug!("API Error: {}", &self);
        }

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
