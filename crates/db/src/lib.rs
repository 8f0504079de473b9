//! Postgres persistence for the burn-in rack.
//!
//! Exposes the [`store::SlotStore`] contract the lifecycle engine runs
//! against, its sqlx implementation [`repositories::SlotRepo`], and the
//! grid provisioning routine. All slot mutation goes through the store's
//! atomic operations; nothing here caches slot state across calls.

pub mod models;
pub mod provision;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use repositories::SlotRepo;
pub use store::SlotStore;

pub type DbPool = sqlx::PgPool;

/// Embedded migrations from `db/migrations` at the workspace root.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Verify the database connection is alive.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
