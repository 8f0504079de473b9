//! The store contract the lifecycle engine runs against.
//!
//! Every method is atomic with respect to concurrent calls touching the
//! same slot id or serial: an implementation must serialize conflicting
//! operations so that no interleaving can put one serial in two slots or
//! lose a concurrent status transition. Conditional updates evaluate
//! their guard and apply their effect indivisibly; multi-step operations
//! run as one all-or-nothing unit of work.

use async_trait::async_trait;
use burnrack_core::types::{DbId, Timestamp};

use crate::models::{ClearedSlot, DevicePlacement, ReadyDevice, Slot};

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Fetch a slot by id.
    async fn get(&self, id: DbId) -> Result<Option<Slot>, sqlx::Error>;

    /// Fetch the slot currently holding `serial`, if any. Backed by the
    /// partial unique index on non-null serials.
    async fn find_by_serial(&self, serial: &str) -> Result<Option<Slot>, sqlx::Error>;

    /// All slots in `(row, col)` order, the display projection.
    async fn list_ordered(&self) -> Result<Vec<Slot>, sqlx::Error>;

    /// Atomically place `serial` into the target slot: any other slot
    /// holding it is fully cleared, and the target is set to PLACE with
    /// every timer field nulled, as one unit of work. An unknown target
    /// id changes nothing and reports `placed: false`.
    async fn move_device(
        &self,
        slot_id: DbId,
        serial: &str,
    ) -> Result<DevicePlacement, sqlx::Error>;

    /// Start the burn-in timer: IN_USE, `started_at = now`,
    /// `ends_at = now + minutes`, `notified_at` reset. Guarded on the
    /// slot holding a device; returns whether the update applied.
    async fn begin_burn(
        &self,
        slot_id: DbId,
        minutes: i32,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error>;

    /// Unconditionally reset a slot to EMPTY, returning the serial and
    /// end time it held just before the reset (read and reset are one
    /// unit of work). `None` for an unknown id.
    async fn take_for_clear(&self, slot_id: DbId) -> Result<Option<ClearedSlot>, sqlx::Error>;

    /// Force READY without touching timer or notification fields.
    /// Guarded on the slot holding a device; returns whether the update
    /// applied.
    async fn force_ready(&self, slot_id: DbId) -> Result<bool, sqlx::Error>;

    /// Sweep phase 1: promote every IN_USE slot whose `ends_at` has
    /// passed to READY. Returns the promoted count.
    async fn promote_expired(&self, now: Timestamp) -> Result<u64, sqlx::Error>;

    /// Sweep phase 2: stamp `notified_at = now` on every READY slot with
    /// `ends_at <= now` and no prior notification, returning exactly the
    /// claimed rows. Stamp and read are a single atomic operation, so
    /// concurrent sweeps can never both claim the same slot.
    async fn claim_ready_unnotified(
        &self,
        now: Timestamp,
    ) -> Result<Vec<ReadyDevice>, sqlx::Error>;
}
