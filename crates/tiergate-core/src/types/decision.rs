//! Decision records returned to UI gating components and API middleware.

use serde::{Deserialize, Serialize};

use super::action::{ActionCategory, LimitField};
use super::limit::{Limit, Quota};

/// Outcome of an advisory action check. A denial is a normal value, not an
/// error: callers render an upgrade prompt from `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    /// Present only when denied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub action: ActionCategory,
    pub field: LimitField,
    pub limit: Limit,
}

impl Decision {
    pub fn allow(action: ActionCategory, field: LimitField, limit: Limit) -> Self {
        Self {
            allowed: true,
            message: None,
            action,
            field,
            limit,
        }
    }

    pub fn deny(
        action: ActionCategory,
        field: LimitField,
        limit: Limit,
        message: String,
    ) -> Self {
        Self {
            allowed: false,
            message: Some(message),
            action,
            field,
            limit,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// Usage against one limit, for quota meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitStatus {
    pub field: LimitField,
    pub limit: Limit,
    pub used: u64,
    pub remaining: Quota,
}

/// One `LimitStatus` per limit field, in `LimitField::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub statuses: Vec<LimitStatus>,
}

impl UsageSummary {
    pub fn get(&self, field: LimitField) -> Option<&LimitStatus> {
        self.statuses.iter().find(|s| s.field == field)
    }
}

/// Result of an authoritative consume against a usage store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ConsumeOutcome {
    /// One unit was recorded. `used_after` is the gated counter after the increment.
    Consumed { used_after: u64 },
    /// Nothing was recorded: `field` is already at `limit`.
    LimitReached { field: LimitField, limit: u64 },
}

impl ConsumeOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed { .. })
    }
}
