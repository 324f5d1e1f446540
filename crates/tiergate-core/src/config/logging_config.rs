//! Logging configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string. `TIERGATE_LOG` overrides it.
    pub filter: Option<String>,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_FILTER)
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}
