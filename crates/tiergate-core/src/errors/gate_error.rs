use super::error_code::GateErrorCode;
use super::{ConfigError, StorageError, TierError};

/// Top-level error type for `QuotaGate` operations.
/// Subsystem errors convert into this via `From` impls.
///
/// A denied action is not an error; it is a `Decision` or
/// `ConsumeOutcome::LimitReached` returned in `Ok`.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("tier error: {0}")]
    Tier(#[from] TierError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl GateError {
    /// Whether this error should be reported to clients as a server fault.
    pub fn is_server_fault(&self) -> bool {
        match self {
            Self::Tier(e) => e.is_server_fault(),
            Self::Storage(_) | Self::Config(_) => true,
        }
    }
}

impl GateErrorCode for GateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Tier(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience type alias.
pub type GateResult<T> = Result<T, GateError>;
