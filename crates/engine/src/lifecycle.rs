//! Operator operations on rack slots.

use std::sync::Arc;

use burnrack_core::types::{DbId, Timestamp};
use burnrack_core::{burn, message, serial};
use burnrack_db::SlotStore;
use burnrack_notify::Notifier;
use chrono::Utc;

use crate::outcome::{Outcome, Rejection};
use crate::sweeper::{run_sweep, SweepReport};

/// Entry point for everything an operator does to the rack.
///
/// Holds the store and notifier handles it was constructed with; clones
/// share them. Validation is consolidated here: each operation either
/// applies through one atomic store call or reports a [`Rejection`]
/// without touching state.
#[derive(Clone)]
pub struct Lifecycle {
    store: Arc<dyn SlotStore>,
    notifier: Arc<dyn Notifier>,
}

impl Lifecycle {
    pub fn new(store: Arc<dyn SlotStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Scan a device into a slot.
    ///
    /// Normalizes and validates the scanned serial, then moves the
    /// device: whichever slot held it before is released in the same
    /// transaction, and the target restarts at PLACE with no timer.
    /// Re-scanning a device into its current slot resets the slot the
    /// same way.
    pub async fn assign(&self, slot_id: DbId, raw_serial: &str) -> Result<Outcome, sqlx::Error> {
        let serial = serial::normalize_serial(raw_serial);
        if serial.is_empty() {
            return Ok(Outcome::Rejected(Rejection::BlankSerial));
        }
        if !serial::is_valid_serial(&serial) {
            return Ok(Outcome::Rejected(Rejection::InvalidSerial(serial)));
        }

        let placement = self.store.move_device(slot_id, &serial).await?;
        if !placement.placed {
            return Ok(Outcome::Rejected(Rejection::UnknownSlot(slot_id)));
        }
        match placement.released_slot_id {
            Some(released) => tracing::info!(
                slot_id,
                serial = %serial,
                released_slot_id = released,
                "device moved between slots"
            ),
            None => tracing::info!(slot_id, serial = %serial, "device placed"),
        }
        Ok(Outcome::Applied)
    }

    /// Start (or restart) the burn-in timer on an occupied slot.
    pub async fn start_timer(&self, slot_id: DbId, minutes: i64) -> Result<Outcome, sqlx::Error> {
        let Some(minutes) = burn::validate_minutes(minutes) else {
            return Ok(Outcome::Rejected(Rejection::InvalidMinutes(minutes)));
        };
        if !self.store.begin_burn(slot_id, minutes, Utc::now()).await? {
            return Ok(Outcome::Rejected(Rejection::DeviceMissing(slot_id)));
        }
        tracing::info!(slot_id, minutes, "burn-in timer started");
        Ok(Outcome::Applied)
    }

    /// Empty a slot, whatever state it is in.
    ///
    /// When a device was present, a pickup message goes out after the
    /// reset commits: "picked up early" with the humanized remaining time
    /// if the timer had not elapsed, the plain success message otherwise.
    /// Delivery is best-effort and never affects the cleared slot.
    pub async fn clear(&self, slot_id: DbId) -> Result<Outcome, sqlx::Error> {
        let Some(cleared) = self.store.take_for_clear(slot_id).await? else {
            return Ok(Outcome::Rejected(Rejection::UnknownSlot(slot_id)));
        };
        tracing::info!(slot_id, "slot cleared");

        if let Some(serial) = cleared.serial {
            let now = Utc::now();
            let message = match cleared.ends_at {
                Some(ends_at) if ends_at > now => {
                    message::picked_up_early(&serial, &burn::humanize_duration(ends_at - now))
                }
                _ => message::picked_up(&serial),
            };
            self.notifier.send(&message).await;
        }
        Ok(Outcome::Applied)
    }

    /// Force an occupied slot to READY ahead of its timer.
    ///
    /// `notified_at` is left untouched, so the sweep still announces the
    /// device once its end time passes.
    pub async fn mark_ready(&self, slot_id: DbId) -> Result<Outcome, sqlx::Error> {
        if !self.store.force_ready(slot_id).await? {
            return Ok(Outcome::Rejected(Rejection::DeviceMissing(slot_id)));
        }
        tracing::info!(slot_id, "slot marked ready");
        Ok(Outcome::Applied)
    }

    /// Run one expiry sweep pass at `now`. See [`run_sweep`].
    pub async fn sweep(&self, now: Timestamp) -> Result<SweepReport, sqlx::Error> {
        run_sweep(self.store.as_ref(), self.notifier.as_ref(), now).await
    }
}
