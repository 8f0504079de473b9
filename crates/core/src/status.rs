//! Slot lifecycle status mapping to the `slot_statuses` lookup table.
//!
//! Variant discriminants match the seed data order (1-based SMALLSERIAL)
//! in the database. A slot cycles EMPTY -> PLACE -> IN_USE -> READY ->
//! EMPTY; the operations themselves guard which moves are reachable.

use serde::Serialize;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Lifecycle state of a rack slot.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    /// No device present; every nullable field is NULL.
    Empty = 1,
    /// A device has been scanned into the slot, timer not yet started.
    Place = 2,
    /// Burn-in timer running; `ends_at` is set.
    InUse = 3,
    /// Timer elapsed (or manually overridden); device awaits pickup.
    Ready = 4,
}

impl SlotStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Look up a status by its database ID.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(SlotStatus::Empty),
            2 => Some(SlotStatus::Place),
            3 => Some(SlotStatus::InUse),
            4 => Some(SlotStatus::Ready),
            _ => None,
        }
    }

    /// Canonical name as seeded in `slot_statuses`.
    pub fn name(self) -> &'static str {
        match self {
            SlotStatus::Empty => "EMPTY",
            SlotStatus::Place => "PLACE",
            SlotStatus::InUse => "IN_USE",
            SlotStatus::Ready => "READY",
        }
    }
}

impl From<SlotStatus> for StatusId {
    fn from(value: SlotStatus) -> Self {
        value as StatusId
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
