//! Repository for the `rack_slots` table.
//!
//! Uses `SlotStatus` from `burnrack_core` for all status transitions.
//! Row-level atomicity comes from conditional single-statement updates,
//! `UPDATE ... RETURNING` claims, and `SELECT ... FOR UPDATE` row locks
//! inside explicit transactions, never from read-then-write sequences
//! against the bare pool.

use async_trait::async_trait;
use burnrack_core::types::{DbId, Timestamp};
use burnrack_core::SlotStatus;

use crate::models::{ClearedSlot, DevicePlacement, ReadyDevice, Slot};
use crate::store::SlotStore;
use crate::DbPool;

/// Column list for `rack_slots` queries.
const COLUMNS: &str = "\
    id, grid_row, grid_col, status_id, serial, \
    started_at, burn_minutes, ends_at, notified_at, updated_at";

/// sqlx-backed [`SlotStore`] implementation.
#[derive(Debug, Clone)]
pub struct SlotRepo {
    pool: DbPool,
}

impl SlotRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for SlotRepo {
    async fn get(&self, id: DbId) -> Result<Option<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rack_slots WHERE id = $1");
        sqlx::query_as::<_, Slot>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rack_slots WHERE serial = $1");
        sqlx::query_as::<_, Slot>(&query)
            .bind(serial)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_ordered(&self) -> Result<Vec<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rack_slots ORDER BY grid_row, grid_col");
        sqlx::query_as::<_, Slot>(&query)
            .fetch_all(&self.pool)
            .await
    }

    /// One transaction: lock the target, lock any current holder of the
    /// serial, clear the holder when it is a different slot, set the
    /// target to PLACE. Either every step commits or none does.
    async fn move_device(
        &self,
        slot_id: DbId,
        serial: &str,
    ) -> Result<DevicePlacement, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Validate the target id before touching anything else.
        let target: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM rack_slots WHERE id = $1 FOR UPDATE")
                .bind(slot_id)
                .fetch_optional(&mut *tx)
                .await?;
        if target.is_none() {
            return Ok(DevicePlacement {
                placed: false,
                released_slot_id: None,
            });
        }

        // Lock any slot that already holds this serial.
        let holder: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM rack_slots WHERE serial = $1 FOR UPDATE")
                .bind(serial)
                .fetch_optional(&mut *tx)
                .await?;

        let mut released_slot_id = None;
        if let Some((holder_id,)) = holder {
            if holder_id != slot_id {
                sqlx::query(
                    "UPDATE rack_slots \
                     SET status_id = $2, serial = NULL, started_at = NULL, \
                         burn_minutes = NULL, ends_at = NULL, notified_at = NULL, \
                         updated_at = NOW() \
                     WHERE id = $1",
                )
                .bind(holder_id)
                .bind(SlotStatus::Empty.id())
                .execute(&mut *tx)
                .await?;
                released_slot_id = Some(holder_id);
            }
        }

        sqlx::query(
            "UPDATE rack_slots \
             SET status_id = $2, serial = $3, started_at = NULL, \
                 burn_minutes = NULL, ends_at = NULL, notified_at = NULL, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(slot_id)
        .bind(SlotStatus::Place.id())
        .bind(serial)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(DevicePlacement {
            placed: true,
            released_slot_id,
        })
    }

    async fn begin_burn(
        &self,
        slot_id: DbId,
        minutes: i32,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rack_slots \
             SET status_id = $2, started_at = $3, burn_minutes = $4, \
                 ends_at = $5, notified_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND serial IS NOT NULL",
        )
        .bind(slot_id)
        .bind(SlotStatus::InUse.id())
        .bind(now)
        .bind(minutes)
        .bind(burnrack_core::burn::ends_at(now, minutes))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One transaction: read the pre-clear fields under a row lock, then
    /// reset the row, so a concurrent operation can never slip between
    /// the read and the reset.
    async fn take_for_clear(&self, slot_id: DbId) -> Result<Option<ClearedSlot>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let cleared = sqlx::query_as::<_, ClearedSlot>(
            "SELECT serial, ends_at FROM rack_slots WHERE id = $1 FOR UPDATE",
        )
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(cleared) = cleared else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE rack_slots \
             SET status_id = $2, serial = NULL, started_at = NULL, \
                 burn_minutes = NULL, ends_at = NULL, notified_at = NULL, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(slot_id)
        .bind(SlotStatus::Empty.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(cleared))
    }

    async fn force_ready(&self, slot_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rack_slots SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND serial IS NOT NULL",
        )
        .bind(slot_id)
        .bind(SlotStatus::Ready.id())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn promote_expired(&self, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rack_slots SET status_id = $2, updated_at = NOW() \
             WHERE status_id = $3 AND ends_at IS NOT NULL AND ends_at <= $1",
        )
        .bind(now)
        .bind(SlotStatus::Ready.id())
        .bind(SlotStatus::InUse.id())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Stamp-and-return in a single statement: two concurrent sweeps
    /// re-evaluate the `notified_at IS NULL` guard under the row lock,
    /// so exactly one of them claims each qualifying row.
    async fn claim_ready_unnotified(
        &self,
        now: Timestamp,
    ) -> Result<Vec<ReadyDevice>, sqlx::Error> {
        sqlx::query_as::<_, ReadyDevice>(
            "UPDATE rack_slots SET notified_at = $1, updated_at = NOW() \
             WHERE status_id = $2 AND ends_at IS NOT NULL AND ends_at <= $1 \
               AND notified_at IS NULL AND serial IS NOT NULL \
             RETURNING id, serial, grid_row, grid_col",
        )
        .bind(now)
        .bind(SlotStatus::Ready.id())
        .fetch_all(&self.pool)
        .await
    }
}
