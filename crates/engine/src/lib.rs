//! Slot lifecycle engine for the burn-in rack.
//!
//! Coordinates the scanner-driven operator operations (assign a device,
//! start its burn-in timer, clear a slot, mark it ready) and the periodic
//! expiry sweep. All state lives behind the [`burnrack_db::SlotStore`]
//! contract; all operator alerts go out through the
//! [`burnrack_notify::Notifier`] capability, strictly after the state
//! change they describe has committed.

pub mod lifecycle;
pub mod outcome;
pub mod sweeper;

pub use lifecycle::Lifecycle;
pub use outcome::{Outcome, Rejection};
pub use sweeper::{run_sweep, SweepReport};
