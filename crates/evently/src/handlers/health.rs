//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (acquires the database connection)

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{handlers::AppError, state::AppState};

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Does not touch the database.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Connects on first use, so a fresh process becomes ready only once the
/// database is reachable. A missing URI reports 500, an unreachable server 503.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let was_connected = state.db.is_connected();
    state.db.acquire().await?;
    if !was_connected {
        tracing::info!("Database ready");
    }
    Ok(Json(json!({ "ready": true })))
}
