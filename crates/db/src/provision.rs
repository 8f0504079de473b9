//! Grid provisioning for the `rack_slots` table.
//!
//! The burn-in rack is a fixed physical grid; slots are seeded here and
//! never reshaped by the lifecycle operations. Provisioning is idempotent:
//! cells already present keep their state, cells outside the requested
//! shape (including skip positions with no physical slot) are removed.

use crate::DbPool;

const DEFAULT_ROWS: i32 = 8;
const DEFAULT_COLS: i32 = 4;
const DEFAULT_SKIP: &str = "1:4";

/// Shape of the physical rack grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of rows, counted from 1.
    pub rows: i32,
    /// Number of columns, counted from 1.
    pub cols: i32,
    /// `(row, col)` positions with no physical slot.
    pub skip: Vec<(i32, i32)>,
}

impl GridSpec {
    pub fn new(rows: i32, cols: i32, skip: Vec<(i32, i32)>) -> Self {
        Self { rows, cols, skip }
    }

    /// Load the grid shape from environment variables with defaults.
    ///
    /// | Env Var     | Default | Format                         |
    /// |-------------|---------|--------------------------------|
    /// | `RACK_ROWS` | `8`     | positive integer               |
    /// | `RACK_COLS` | `4`     | positive integer               |
    /// | `RACK_SKIP` | `1:4`   | comma-separated `row:col` list |
    pub fn from_env() -> Self {
        let rows: i32 = std::env::var("RACK_ROWS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ROWS);

        let cols: i32 = std::env::var("RACK_COLS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_COLS);

        let skip = parse_skip(
            &std::env::var("RACK_SKIP").unwrap_or_else(|_| DEFAULT_SKIP.into()),
        );

        Self { rows, cols, skip }
    }

    /// Whether `(row, col)` is a hole in the grid.
    pub fn is_skipped(&self, row: i32, col: i32) -> bool {
        self.skip.contains(&(row, col))
    }
}

/// Parse a comma-separated `row:col` list. Malformed entries are logged
/// and dropped rather than failing the whole spec.
fn parse_skip(raw: &str) -> Vec<(i32, i32)> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let parsed = entry
                .split_once(':')
                .and_then(|(row, col)| Some((row.parse().ok()?, col.parse().ok()?)));
            if parsed.is_none() {
                tracing::warn!(entry, "ignoring malformed RACK_SKIP entry");
            }
            parsed
        })
        .collect()
}

/// Bring `rack_slots` in line with `spec` in one transaction.
///
/// Deletes slots outside the grid, deletes skip positions, inserts any
/// missing in-range cells as EMPTY, and returns the resulting slot count.
/// Existing in-range slots are left untouched, devices included.
pub async fn provision(pool: &DbPool, spec: &GridSpec) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM rack_slots \
         WHERE grid_row < 1 OR grid_row > $1 OR grid_col < 1 OR grid_col > $2",
    )
    .bind(spec.rows)
    .bind(spec.cols)
    .execute(&mut *tx)
    .await?;

    for &(row, col) in &spec.skip {
        sqlx::query("DELETE FROM rack_slots WHERE grid_row = $1 AND grid_col = $2")
            .bind(row)
            .bind(col)
            .execute(&mut *tx)
            .await?;
    }

    for row in 1..=spec.rows {
        for col in 1..=spec.cols {
            if spec.is_skipped(row, col) {
                continue;
            }
            sqlx::query(
                "INSERT INTO rack_slots (grid_row, grid_col) VALUES ($1, $2) \
                 ON CONFLICT (grid_row, grid_col) DO NOTHING",
            )
            .bind(row)
            .bind(col)
            .execute(&mut *tx)
            .await?;
        }
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rack_slots")
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        rows = spec.rows,
        cols = spec.cols,
        skipped = spec.skip.len(),
        total_slots = count,
        "rack grid provisioned"
    );
    Ok(count)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
