//! Row models and store DTOs.

pub mod slot;

pub use slot::{ClearedSlot, DevicePlacement, ReadyDevice, Slot};
