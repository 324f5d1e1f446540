//! Connection setup: open, apply pragmas, migrate.

pub mod pragmas;

use std::path::Path;

use rusqlite::Connection;
use tiergate_core::errors::StorageError;
use tracing::debug;

use crate::{migrations, to_storage_err};

/// Open a ready-to-use connection. `None` opens an in-memory database.
pub fn open_connection(path: Option<&Path>, busy_timeout_ms: u64) -> Result<Connection, StorageError> {
    let conn = match path {
        Some(p) => {
            debug!(path = %p.display(), "opening usage database");
            Connection::open(p).map_err(to_storage_err)?
        }
        None => Connection::open_in_memory().map_err(to_storage_err)?,
    };
    pragmas::apply_pragmas(&conn)?;
    pragmas::apply_busy_timeout(&conn, busy_timeout_ms)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
