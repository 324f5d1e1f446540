//! Usage-store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::period::ResetPolicy;

/// Configuration for the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path. None = in-memory.
    pub db_path: Option<PathBuf>,
    /// Counter reset boundary. Deliberately has no default.
    pub reset_policy: Option<ResetPolicy>,
    /// SQLite busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
}

impl StorageConfig {
    /// The configured reset policy, or `ConfigError::MissingResetPolicy`.
    pub fn effective_reset_policy(&self) -> Result<ResetPolicy, ConfigError> {
        self.reset_policy.ok_or(ConfigError::MissingResetPolicy)
    }

    /// Returns the effective busy timeout, defaulting to 5000ms.
    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5_000)
    }
}
