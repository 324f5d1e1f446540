//! Tier table and identifier parsing errors.

use super::error_code::{self, GateErrorCode};

/// Errors raised while resolving tiers, actions and features from their wire ids.
///
/// `UnknownTier` is a data-integrity fault: an account carries a tier that the
/// capability table does not know. It must propagate and surface as a
/// server-side failure, never degrade into a default tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierError {
    #[error("unknown tier '{tier}': no capability record configured")]
    UnknownTier { tier: String },

    #[error("unknown action category '{action}'")]
    UnknownAction { action: String },

    #[error("unknown feature '{feature}'")]
    UnknownFeature { feature: String },

    #[error("tier table incomplete: {details}")]
    TableIncomplete { details: String },

    #[error("tier table has more than one record for '{tier}'")]
    DuplicateTier { tier: String },
}

impl TierError {
    /// Whether this error should surface as a 5xx-class condition.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::UnknownTier { .. } | Self::TableIncomplete { .. } | Self::DuplicateTier { .. }
        )
    }
}

impl GateErrorCode for TierError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTier { .. } => error_code::TIER_UNKNOWN,
            Self::UnknownAction { .. } => error_code::ACTION_UNKNOWN,
            Self::UnknownFeature { .. } => error_code::FEATURE_UNKNOWN,
            Self::TableIncomplete { .. } => error_code::TIER_TABLE_INCOMPLETE,
            Self::DuplicateTier { .. } => error_code::TIER_TABLE_DUPLICATE,
        }
    }
}
