//! Usage-store errors.

use super::error_code::{self, GateErrorCode};

/// Errors that can occur in a usage store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Corrupt counter row for account '{account}': {details}")]
    CounterCorrupt { account: String, details: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl GateErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::CounterCorrupt { .. } => error_code::COUNTER_CORRUPT,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
