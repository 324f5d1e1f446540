//! Migration runner: version tracking, forward-only, transactional per migration.

mod v001_usage_counters;
mod v002_cycle_anchor;

use rusqlite::Connection;
use tiergate_core::errors::StorageError;
use tracing::{debug, info, warn};

use crate::to_storage_err;

/// Latest schema version.
pub const LATEST_VERSION: u32 = 2;

type MigrationFn = fn(&Connection) -> Result<(), StorageError>;

const MIGRATIONS: [(u32, &str, MigrationFn); 2] = [
    (1, "usage_counters", v001_usage_counters::migrate),
    (2, "cycle_anchor", v002_cycle_anchor::migrate),
];

/// Current schema version. 0 if nothing has been applied.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(to_storage_err)?;

    if !exists {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}

/// Run all pending migrations. Returns how many were applied.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(to_storage_err)?;

    let current = current_version(conn)?;
    if current >= LATEST_VERSION {
        debug!("usage schema is up to date (v{current})");
        return Ok(0);
    }

    info!("running migrations: v{} → v{}", current, LATEST_VERSION);
    let mut applied = 0;

    for &(version, name, migrate_fn) in &MIGRATIONS {
        if version <= current {
            continue;
        }

        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| StorageError::MigrationFailed {
                version,
                message: format!("begin transaction: {e}"),
            })?;

        // Another connection may have applied it between the read above and
        // taking the write lock.
        let applied_elsewhere = current_version(conn).map(|v| v >= version);
        match applied_elsewhere {
            Ok(true) => {
                conn.execute_batch("COMMIT").map_err(|e| StorageError::MigrationFailed {
                    version,
                    message: format!("commit: {e}"),
                })?;
                debug!("migration v{version:03} already applied by another connection");
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(e);
            }
        }

        let result = migrate_fn(conn).and_then(|()| {
            conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                .map(|_| ())
                .map_err(to_storage_err)
        });

        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| StorageError::MigrationFailed {
                        version,
                        message: format!("commit: {e}"),
                    })?;
                info!("applied migration v{version:03}: {name}");
                applied += 1;
            }
            Err(e) => {
                warn!("migration v{version:03} failed: {e}, rolling back");
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StorageError::MigrationFailed {
                    version,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(applied)
}
