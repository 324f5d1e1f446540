//! # tiergate-storage
//!
//! SQLite persistence for usage counters. Implements `IUsageStore` with an
//! atomic increment-if-below-limit, so it can serve as the authoritative
//! enforcement point behind the advisory decision engine.
//! WAL mode, single serialized write connection, forward-only migrations.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use store::SqliteUsageStore;

use tiergate_core::errors::StorageError;

/// Map a rusqlite error into a `StorageError`, keeping busy distinct.
pub fn to_storage_err(e: rusqlite::Error) -> StorageError {
    if e.sqlite_error_code() == Some(rusqlite::ErrorCode::DatabaseBusy) {
        return StorageError::DbBusy;
    }
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
