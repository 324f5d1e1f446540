//! v001: usage_counters table.

use rusqlite::Connection;
use tiergate_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS usage_counters (
            account_id      TEXT    NOT NULL,
            period          TEXT    NOT NULL CHECK (period IN ('daily', 'monthly')),
            period_start_ms INTEGER NOT NULL,
            searches        INTEGER NOT NULL DEFAULT 0 CHECK (searches >= 0),
            ai_analyses     INTEGER NOT NULL DEFAULT 0 CHECK (ai_analyses >= 0),
            vin_searches    INTEGER NOT NULL DEFAULT 0 CHECK (vin_searches >= 0),
            exports         INTEGER NOT NULL DEFAULT 0 CHECK (exports >= 0),
            PRIMARY KEY (account_id, period)
        ) WITHOUT ROWID;",
    )
    .map_err(to_storage_err)
}
