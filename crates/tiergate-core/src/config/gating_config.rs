//! Gating configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_UPGRADE_URL: &str = "/pricing";

/// Settings for user-facing gating decisions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GatingConfig {
    /// Link shown in feature denial messages. Default: "/pricing".
    pub upgrade_url: Option<String>,
}

impl GatingConfig {
    pub fn effective_upgrade_url(&self) -> &str {
        self.upgrade_url.as_deref().unwrap_or(DEFAULT_UPGRADE_URL)
    }
}
