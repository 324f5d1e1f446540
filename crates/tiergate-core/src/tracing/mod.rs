//! Tracing subscriber setup for binaries and tests embedding tiergate.

pub mod setup;

pub use setup::{init_tracing, LOG_ENV_VAR};
