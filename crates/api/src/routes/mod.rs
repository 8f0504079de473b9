pub mod health;
pub mod rack;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rack                        rack projection (GET)
/// /rack/slots/{id}/assign      scan a device into a slot (POST)
/// /rack/slots/{id}/timer       start the burn-in timer (POST)
/// /rack/slots/{id}/clear       empty a slot (POST)
/// /rack/slots/{id}/ready       force a slot to READY (POST)
/// /rack/sweep                  run one expiry sweep pass (POST)
/// /rack/provision              rebuild the slot grid (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Rack projection and slot lifecycle commands.
        .nest("/rack", rack::router())
}
