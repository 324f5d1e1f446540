pub mod error_code;

mod config_error;
mod gate_error;
mod storage_error;
mod tier_error;

pub use config_error::ConfigError;
pub use error_code::GateErrorCode;
pub use gate_error::{GateError, GateResult};
pub use storage_error::StorageError;
pub use tier_error::TierError;
