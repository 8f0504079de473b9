use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Payload for `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database responds, `"degraded"` otherwise.
    pub status: &'static str,
    /// Server version from Cargo.toml.
    pub version: &'static str,
    /// Result of the database round-trip.
    pub db_healthy: bool,
}

/// GET /health -- liveness plus a database round-trip.
///
/// Always answers 200; database trouble is reported in the body as
/// `degraded` rather than as an HTTP error.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = burnrack_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Health routes, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
