//! Handlers for the `/rack` resource.
//!
//! Slot commands delegate to the lifecycle engine and translate its
//! outcome: applied commands return the standard `{ "data": ... }`
//! envelope, rejected ones surface as 422 with a reason tag.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use burnrack_core::error::CoreError;
use burnrack_core::status::SlotStatus;
use burnrack_core::types::{DbId, Timestamp};
use burnrack_db::provision::{provision, GridSpec};
use burnrack_engine::Outcome;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /rack/slots/{id}/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    /// Device serial exactly as scanned or typed.
    pub serial: String,
}

/// Body for `POST /rack/slots/{id}/timer`.
#[derive(Debug, Deserialize)]
pub struct TimerRequest {
    /// Burn-in duration in whole minutes.
    pub minutes: i64,
}

/// One slot in the rack projection.
#[derive(Debug, Serialize)]
struct SlotView {
    id: DbId,
    row: i32,
    col: i32,
    status: &'static str,
    serial: Option<String>,
    ends_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Rack projection
// ---------------------------------------------------------------------------

/// GET /api/v1/rack
///
/// Return every slot in grid order along with the overall grid extent.
pub async fn get_rack(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let slots = state.store.list_ordered().await?;

    let rows = slots.iter().map(|s| s.row).max().unwrap_or(0);
    let cols = slots.iter().map(|s| s.col).max().unwrap_or(0);

    let views = slots
        .into_iter()
        .map(|slot| {
            let status = SlotStatus::from_id(slot.status_id).ok_or_else(|| {
                CoreError::Internal(format!("unknown slot status id {}", slot.status_id))
            })?;
            Ok(SlotView {
                id: slot.id,
                row: slot.row,
                col: slot.col,
                status: status.name(),
                serial: slot.serial,
                ends_at: slot.ends_at,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(Json(json!({
        "data": { "rows": rows, "cols": cols, "slots": views }
    })))
}

// ---------------------------------------------------------------------------
// Slot commands
// ---------------------------------------------------------------------------

/// POST /api/v1/rack/slots/{id}/assign
///
/// Scan a device into a slot, releasing it from any slot that held it
/// before.
pub async fn assign_device(
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
    Json(body): Json<AssignRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = state.lifecycle.assign(slot_id, &body.serial).await?;
    applied(outcome)
}

/// POST /api/v1/rack/slots/{id}/timer
///
/// Start the burn-in countdown on an occupied slot.
pub async fn start_timer(
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
    Json(body): Json<TimerRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = state.lifecycle.start_timer(slot_id, body.minutes).await?;
    applied(outcome)
}

/// POST /api/v1/rack/slots/{id}/clear
///
/// Empty a slot, announcing the pickup when it held a device.
pub async fn clear_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = state.lifecycle.clear(slot_id).await?;
    applied(outcome)
}

/// POST /api/v1/rack/slots/{id}/ready
///
/// Force a slot straight to READY without waiting for its timer.
pub async fn mark_ready(
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = state.lifecycle.mark_ready(slot_id).await?;
    applied(outcome)
}

/// Convert an engine [`Outcome`] into the standard success envelope, or
/// the 422 rejection response.
fn applied(outcome: Outcome) -> AppResult<Json<serde_json::Value>> {
    match outcome {
        Outcome::Applied => Ok(Json(json!({ "data": { "ok": true } }))),
        Outcome::Rejected(rejection) => Err(AppError::Rejected(rejection)),
    }
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

/// POST /api/v1/rack/sweep
///
/// Run one expiry sweep pass immediately instead of waiting for the
/// worker's next tick.
pub async fn trigger_sweep(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let report = state.lifecycle.sweep(Utc::now()).await?;

    Ok(Json(json!({ "data": report })))
}

/// POST /api/v1/rack/provision
///
/// Rebuild the slot grid from the `RACK_*` environment variables.
/// Disabled unless `RACK_ALLOW_PROVISION` is set, since provisioning
/// deletes slots outside the configured shape.
pub async fn provision_rack(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    if !state.config.allow_provision {
        return Err(AppError::Forbidden(
            "rack provisioning is disabled; set RACK_ALLOW_PROVISION=1 to enable".to_string(),
        ));
    }

    let spec = GridSpec::from_env();
    let total_slots = provision(&state.pool, &spec).await?;

    Ok(Json(json!({
        "data": {
            "rows": spec.rows,
            "cols": spec.cols,
            "skipped": spec.skip.len(),
            "total_slots": total_slots,
        }
    })))
}
