//! Configuration loading errors.

use super::error_code::{self, GateErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("storage.reset_policy is not set; the persistence layer must choose 'calendar_utc' or 'rolling'")]
    MissingResetPolicy,
}

impl GateErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingResetPolicy => error_code::CONFIG_MISSING_RESET_POLICY,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
