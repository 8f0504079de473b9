//! Periodic expiry sweep over the rack.
//!
//! Each tick runs one two-phase sweep pass: expired IN_USE slots are
//! promoted to READY, then every ready-and-due device not yet announced
//! is claimed and its pickup alert sent. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use burnrack_db::SlotRepo;
use burnrack_engine::run_sweep;
use burnrack_notify::SlackWebhook;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// Default seconds between sweep passes.
const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Run the sweep loop until `cancel` is triggered.
///
/// The interval comes from `SWEEP_INTERVAL_SECS` (defaults to 60). A
/// failed pass is logged and the loop keeps going; the next tick retries
/// from current database state.
pub async fn run(repo: SlotRepo, webhook: SlackWebhook, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    tracing::info!(interval_secs, "Expiry sweep job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Expiry sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = run_sweep(&repo, &webhook, Utc::now()).await {
                    tracing::error!(error = %e, "Sweep pass failed");
                }
            }
        }
    }
}
