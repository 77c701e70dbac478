//! Health check handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Time of the check
    pub timestamp: DateTime<Utc>,
    /// Service version
    pub version: String,
    /// "connected" or "disconnected"
    pub database: String,
    /// Storage error when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report service and storage health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and storage are reachable", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.account_service.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                timestamp: Utc::now(),
                version,
                database: "connected".to_string(),
                error: None,
            }),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    timestamp: Utc::now(),
                    version,
                    database: "disconnected".to_string(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
