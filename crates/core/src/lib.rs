//! Domain logic for the burn-in rack: slot lifecycle states, serial-number
//! normalization, burn-timer math, and operator message composition.
//!
//! This crate has zero internal deps and performs no I/O so it can be used
//! by the store, the lifecycle engine, and any future CLI tooling alike.

pub mod burn;
pub mod error;
pub mod message;
pub mod serial;
pub mod status;
pub mod types;

pub use error::CoreError;
pub use status::SlotStatus;
