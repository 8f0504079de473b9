//! sqlx repositories.

pub mod slot_repo;

pub use slot_repo::SlotRepo;
