//! v002: cycle_anchor_ms on usage_counters. Existing rows anchor at their
//! current period start.

use rusqlite::Connection;
use tiergate_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "ALTER TABLE usage_counters ADD COLUMN cycle_anchor_ms INTEGER;
         UPDATE usage_counters SET cycle_anchor_ms = period_start_ms
            WHERE cycle_anchor_ms IS NULL;",
    )
    .map_err(to_storage_err)
}
