//! Connection pragmas.

use std::time::Duration;

use rusqlite::Connection;
use tiergate_core::errors::StorageError;

use crate::to_storage_err;

/// WAL journal, NORMAL sync, foreign keys on.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA temp_store = MEMORY;",
    )
    .map_err(to_storage_err)
}

pub fn apply_busy_timeout(conn: &Connection, busy_timeout_ms: u64) -> Result<(), StorageError> {
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
        .map_err(to_storage_err)
}
