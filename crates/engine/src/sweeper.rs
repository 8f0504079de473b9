//! Two-phase expiry sweep with at-most-once notification.

use burnrack_core::message;
use burnrack_core::types::Timestamp;
use burnrack_db::SlotStore;
use burnrack_notify::Notifier;
use serde::Serialize;

/// What one sweep pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Slots whose burn timer elapsed and were promoted to READY.
    pub promoted: u64,
    /// Devices announced (and stamped `notified_at`) this pass.
    pub notified: u64,
}

impl SweepReport {
    pub fn is_quiet(&self) -> bool {
        self.promoted == 0 && self.notified == 0
    }
}

/// One sweep pass over the rack at time `now`.
///
/// Phase 1 promotes every expired burn to READY. Phase 2 claims the
/// ready-and-due rows not yet announced, stamping `notified_at` in the
/// same statement that reads them, then sends one ready-for-pickup
/// message per claimed device. The claim makes the announcement
/// at-most-once: overlapping sweeps cannot both win a row, and a message
/// lost after the stamp is not resent.
///
/// Safe to call from any number of triggers on any cadence.
pub async fn run_sweep(
    store: &dyn SlotStore,
    notifier: &dyn Notifier,
    now: Timestamp,
) -> Result<SweepReport, sqlx::Error> {
    let promoted = store.promote_expired(now).await?;

    let claimed = store.claim_ready_unnotified(now).await?;
    let notified = claimed.len() as u64;
    for device in claimed {
        let message = message::ready_for_pickup(&device.serial, device.row, device.col);
        notifier.send(&message).await;
    }

    let report = SweepReport { promoted, notified };
    if report.is_quiet() {
        tracing::debug!("sweep pass found nothing due");
    } else {
        tracing::info!(promoted, notified, "sweep pass");
    }
    Ok(report)
}
