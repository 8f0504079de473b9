//! Route definitions for the `/rack` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rack;
use crate::state::AppState;

/// Routes mounted at `/rack`.
///
/// ```text
/// GET    /                     -> get_rack
/// POST   /slots/{id}/assign    -> assign_device
/// POST   /slots/{id}/timer     -> start_timer
/// POST   /slots/{id}/clear     -> clear_slot
/// POST   /slots/{id}/ready     -> mark_ready
/// POST   /sweep                -> trigger_sweep
/// POST   /provision            -> provision_rack
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Rack projection
        .route("/", get(rack::get_rack))
        // Slot commands
        .route("/slots/{id}/assign", post(rack::assign_device))
        .route("/slots/{id}/timer", post(rack::start_timer))
        .route("/slots/{id}/clear", post(rack::clear_slot))
        .route("/slots/{id}/ready", post(rack::mark_ready))
        // Maintenance
        .route("/sweep", post(rack::trigger_sweep))
        .route("/provision", post(rack::provision_rack))
}
