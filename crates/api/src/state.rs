use std::sync::Arc;

use burnrack_db::{DbPool, SlotStore};
use burnrack_engine::Lifecycle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Slot persistence, used directly for read-side queries.
    pub store: Arc<dyn SlotStore>,
    /// Lifecycle engine handling slot commands and pickup notifications.
    pub lifecycle: Lifecycle,
}
