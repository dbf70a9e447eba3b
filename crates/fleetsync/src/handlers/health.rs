//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Liveness plus a store round trip through the fleet repository

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Storage health check.
///
/// Lists fleets, which reads from the cache or the store. Returns 503 if the
/// store cannot be reached.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.fleets.get_all().await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "healthy": true }))).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "healthy": false,
                    "error": err.to_string()
                })),
            )
                .into_response()
        }
    }
}
