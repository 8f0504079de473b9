//! Shared engine test harness: an in-memory slot store and a recording
//! notifier, wired into a [`Lifecycle`] exactly as production wires the
//! Postgres store and the Slack webhook.

use std::sync::Arc;

use async_trait::async_trait;
use burnrack_core::types::DbId;
use burnrack_core::SlotStatus;
use burnrack_db::models::{ClearedSlot, DevicePlacement, ReadyDevice, Slot};
use burnrack_db::SlotStore;
use burnrack_engine::Lifecycle;
use burnrack_notify::Notifier;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory [`SlotStore`]: one async mutex over the whole table, so every
/// operation is serialized end to end, which is exactly the atomicity the
/// contract asks of an implementation.
pub struct MemoryStore {
    slots: Mutex<Vec<Slot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Seed an EMPTY grid; slot ids run 1.. in `(row, col)` order.
    pub async fn with_grid(rows: i32, cols: i32) -> Self {
        let store = Self::new();
        for row in 1..=rows {
            for col in 1..=cols {
                store.seed(row, col).await;
            }
        }
        store
    }

    /// Append one EMPTY slot, returning its id.
    pub async fn seed(&self, row: i32, col: i32) -> DbId {
        let mut slots = self.slots.lock().await;
        let id = slots.len() as DbId + 1;
        slots.push(empty_slot(id, row, col));
        id
    }
}

fn empty_slot(id: DbId, row: i32, col: i32) -> Slot {
    Slot {
        id,
        row,
        col,
        status_id: SlotStatus::Empty.id(),
        serial: None,
        started_at: None,
        burn_minutes: None,
        ends_at: None,
        notified_at: None,
        updated_at: Utc::now(),
    }
}

fn reset(slot: &mut Slot) {
    slot.status_id = SlotStatus::Empty.id();
    slot.serial = None;
    slot.started_at = None;
    slot.burn_minutes = None;
    slot.ends_at = None;
    slot.notified_at = None;
    slot.updated_at = Utc::now();
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn get(&self, id: DbId) -> Result<Option<Slot>, sqlx::Error> {
        let slots = self.slots.lock().await;
        Ok(slots.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<Slot>, sqlx::Error> {
        let slots = self.slots.lock().await;
        Ok(slots
            .iter()
            .find(|s| s.serial.as_deref() == Some(serial))
            .cloned())
    }

    async fn list_ordered(&self) -> Result<Vec<Slot>, sqlx::Error> {
        let mut slots = self.slots.lock().await.clone();
        slots.sort_by_key(|s| (s.row, s.col));
        Ok(slots)
    }

    async fn move_device(
        &self,
        slot_id: DbId,
        serial: &str,
    ) -> Result<DevicePlacement, sqlx::Error> {
        let mut slots = self.slots.lock().await;
        if !slots.iter().any(|s| s.id == slot_id) {
            return Ok(DevicePlacement {
                placed: false,
                released_slot_id: None,
            });
        }

        let mut released_slot_id = None;
        if let Some(holder) = slots
            .iter_mut()
            .find(|s| s.serial.as_deref() == Some(serial))
        {
            if holder.id != slot_id {
                released_slot_id = Some(holder.id);
                reset(holder);
            }
        }

        let target = slots.iter_mut().find(|s| s.id == slot_id).unwrap();
        target.status_id = SlotStatus::Place.id();
        target.serial = Some(serial.to_string());
        target.started_at = None;
        target.burn_minutes = None;
        target.ends_at = None;
        target.notified_at = None;
        target.updated_at = Utc::now();

        Ok(DevicePlacement {
            placed: true,
            released_slot_id,
        })
    }

    async fn begin_burn(
        &self,
        slot_id: DbId,
        minutes: i32,
        now: burnrack_core::types::Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let mut slots = self.slots.lock().await;
        let Some(slot) = slots
            .iter_mut()
            .find(|s| s.id == slot_id && s.serial.is_some())
        else {
            return Ok(false);
        };
        slot.status_id = SlotStatus::InUse.id();
        slot.started_at = Some(now);
        slot.burn_minutes = Some(minutes);
        slot.ends_at = Some(burnrack_core::burn::ends_at(now, minutes));
        slot.notified_at = None;
        slot.updated_at = Utc::now();
        Ok(true)
    }

    async fn take_for_clear(&self, slot_id: DbId) -> Result<Option<ClearedSlot>, sqlx::Error> {
        let mut slots = self.slots.lock().await;
        let Some(slot) = slots.iter_mut().find(|s| s.id == slot_id) else {
            return Ok(None);
        };
        let cleared = ClearedSlot {
            serial: slot.serial.clone(),
            ends_at: slot.ends_at,
        };
        reset(slot);
        Ok(Some(cleared))
    }

    async fn force_ready(&self, slot_id: DbId) -> Result<bool, sqlx::Error> {
        let mut slots = self.slots.lock().await;
        let Some(slot) = slots
            .iter_mut()
            .find(|s| s.id == slot_id && s.serial.is_some())
        else {
            return Ok(false);
        };
        slot.status_id = SlotStatus::Ready.id();
        slot.updated_at = Utc::now();
        Ok(true)
    }

    async fn promote_expired(
        &self,
        now: burnrack_core::types::Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let mut slots = self.slots.lock().await;
        let mut promoted = 0;
        for slot in slots.iter_mut() {
            if slot.status_id == SlotStatus::InUse.id()
                && slot.ends_at.is_some_and(|ends_at| ends_at <= now)
            {
                slot.status_id = SlotStatus::Ready.id();
                slot.updated_at = Utc::now();
                promoted += 1;
            }
        }
        Ok(promoted)
    }

    async fn claim_ready_unnotified(
        &self,
        now: burnrack_core::types::Timestamp,
    ) -> Result<Vec<ReadyDevice>, sqlx::Error> {
        let mut slots = self.slots.lock().await;
        let mut claimed = Vec::new();
        for slot in slots.iter_mut() {
            if slot.status_id == SlotStatus::Ready.id()
                && slot.ends_at.is_some_and(|ends_at| ends_at <= now)
                && slot.notified_at.is_none()
                && slot.serial.is_some()
            {
                slot.notified_at = Some(now);
                slot.updated_at = Utc::now();
                claimed.push(ReadyDevice {
                    id: slot.id,
                    serial: slot.serial.clone().unwrap(),
                    row: slot.row,
                    col: slot.col,
                });
            }
        }
        Ok(claimed)
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

/// Notifier that records every message for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub async fn messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) {
        self.messages.lock().await.push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A lifecycle over an in-memory grid, with direct handles kept for state
/// setup and assertions.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub lifecycle: Lifecycle,
}

impl Harness {
    /// Put `slot_id` into a burn that expired in the past: the device is
    /// assigned and its `burn_minutes`-minute timer started `minutes_ago`
    /// minutes ago.
    pub async fn back_date_burn(
        &self,
        slot_id: DbId,
        serial: &str,
        burn_minutes: i32,
        minutes_ago: i64,
    ) {
        self.store.move_device(slot_id, serial).await.unwrap();
        self.store
            .begin_burn(
                slot_id,
                burn_minutes,
                Utc::now() - Duration::minutes(minutes_ago),
            )
            .await
            .unwrap();
    }
}

/// Build a harness over a freshly seeded `rows` x `cols` grid.
pub async fn harness(rows: i32, cols: i32) -> Harness {
    let store = Arc::new(MemoryStore::with_grid(rows, cols).await);
    let notifier = Arc::new(RecordingNotifier::default());
    let lifecycle = Lifecycle::new(store.clone(), notifier.clone());
    Harness {
        store,
        notifier,
        lifecycle,
    }
}
