//! Slot entity model and the DTOs returned by store operations.

use burnrack_core::status::StatusId;
use burnrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `rack_slots` table.
///
/// `status_id` references the `slot_statuses` lookup table; decode with
/// [`burnrack_core::SlotStatus::from_id`] where a name is needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Slot {
    pub id: DbId,
    #[sqlx(rename = "grid_row")]
    pub row: i32,
    #[sqlx(rename = "grid_col")]
    pub col: i32,
    pub status_id: StatusId,
    pub serial: Option<String>,
    pub started_at: Option<Timestamp>,
    pub burn_minutes: Option<i32>,
    pub ends_at: Option<Timestamp>,
    pub notified_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// Fields captured from a slot in the instant before a clear reset,
/// used to compose the pickup message.
#[derive(Debug, Clone, FromRow)]
pub struct ClearedSlot {
    pub serial: Option<String>,
    pub ends_at: Option<Timestamp>,
}

/// A slot claimed by the sweeper's notify-once phase.
#[derive(Debug, Clone, FromRow)]
pub struct ReadyDevice {
    pub id: DbId,
    pub serial: String,
    #[sqlx(rename = "grid_row")]
    pub row: i32,
    #[sqlx(rename = "grid_col")]
    pub col: i32,
}

/// Result of the atomic assign/move operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePlacement {
    /// Whether the target slot existed and was set to PLACE.
    pub placed: bool,
    /// The slot implicitly released because it previously held the serial.
    pub released_slot_id: Option<DbId>,
}
