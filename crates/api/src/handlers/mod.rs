//! Request handlers for the rack API.
//!
//! Handlers delegate slot commands to the lifecycle engine in
//! `burnrack_engine` and read-side queries to the slot store, mapping
//! failures via [`AppError`](crate::error::AppError).

pub mod rack;
