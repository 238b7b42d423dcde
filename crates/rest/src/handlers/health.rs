//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::core::Backend;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - `{"status": "healthy", "backend": ..., "timestamp": ...}`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: Backend + Send + Sync,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Round-trips a query through the storage backend.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - Storage answered
/// - `503 Service Unavailable` - Storage did not answer
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: Backend + Send + Sync,
{
    debug!("Processing readiness check request");

    let backend_name = state.storage().name();

    if let Err(e) = state.storage().health_check().await {
        warn!(backend = backend_name, error = %e, "Readiness check failed");
        return Err(RestError::ServiceUnavailable {
            message: format!("Storage backend '{}' is not ready", backend_name),
        });
    }

    let response = serde_json::json!({
        "status": "ready",
        "backend": backend_name,
        "checks": {
            "storage": "ok"
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
