//! Stable error codes surfaced to API middleware and logs.

/// Every tiergate error maps to a stable, machine-readable code.
pub trait GateErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const TIER_UNKNOWN: &str = "TIER_UNKNOWN";
pub const ACTION_UNKNOWN: &str = "ACTION_UNKNOWN";
pub const FEATURE_UNKNOWN: &str = "FEATURE_UNKNOWN";
pub const TIER_TABLE_INCOMPLETE: &str = "TIER_TABLE_INCOMPLETE";
pub const TIER_TABLE_DUPLICATE: &str = "TIER_TABLE_DUPLICATE";

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const COUNTER_CORRUPT: &str = "COUNTER_CORRUPT";

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_MISSING_RESET_POLICY: &str = "CONFIG_MISSING_RESET_POLICY";
