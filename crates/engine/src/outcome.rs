//! Accepted/rejected results for operator operations.
//!
//! A rejection is reported data, not an error: the operation refused to
//! run and changed no state. `Err` on an engine call always means the
//! store itself was unavailable.

use std::fmt;

use burnrack_core::burn::MAX_BURN_MINUTES;
use burnrack_core::serial::{SERIAL_MAX_LEN, SERIAL_MIN_LEN};
use burnrack_core::types::DbId;

/// Result of an operator operation that reached the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested.
    Applied,
    /// The operation was refused; nothing changed.
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Why an operator operation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The scanned identifier was empty once whitespace was stripped.
    BlankSerial,
    /// The canonical identifier fails the serial format rules.
    InvalidSerial(String),
    /// Burn duration outside the accepted range of whole minutes.
    InvalidMinutes(i64),
    /// No slot with this id.
    UnknownSlot(DbId),
    /// The slot does not exist or holds no device to act on.
    DeviceMissing(DbId),
}

impl Rejection {
    /// Stable machine-readable tag for API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::BlankSerial => "BLANK_SERIAL",
            Rejection::InvalidSerial(_) => "INVALID_SERIAL",
            Rejection::InvalidMinutes(_) => "INVALID_MINUTES",
            Rejection::UnknownSlot(_) => "UNKNOWN_SLOT",
            Rejection::DeviceMissing(_) => "DEVICE_MISSING",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BlankSerial => write!(f, "serial is empty after normalization"),
            Rejection::InvalidSerial(serial) => write!(
                f,
                "serial '{serial}' is not a valid device identifier \
                 ({SERIAL_MIN_LEN}-{SERIAL_MAX_LEN} chars from A-Z 0-9 . _ -)"
            ),
            Rejection::InvalidMinutes(minutes) => write!(
                f,
                "burn duration must be 1-{MAX_BURN_MINUTES} whole minutes, got {minutes}"
            ),
            Rejection::UnknownSlot(id) => write!(f, "no slot with id {id}"),
            Rejection::DeviceMissing(id) => {
                write!(f, "slot {id} does not exist or holds no device")
            }
        }
    }
}
