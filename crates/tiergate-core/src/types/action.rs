//! Action categories, the limit fields they map to, and tracking periods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TierError;

/// Tracking period of a usage counter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Daily,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 2] = [Self::Daily, Self::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quota-consuming action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Search,
    Vin,
    Export,
    Ai,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 4] = [Self::Search, Self::Vin, Self::Export, Self::Ai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Vin => "vin",
            Self::Export => "export",
            Self::Ai => "ai",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "search" => Some(Self::Search),
            "vin" => Some(Self::Vin),
            "export" => Some(Self::Export),
            "ai" => Some(Self::Ai),
            _ => None,
        }
    }

    /// The single limit field this action is gated on. Total over all actions.
    pub fn limit_field(&self) -> LimitField {
        match self {
            Self::Search => LimitField::DailySearches,
            Self::Vin => LimitField::MonthlyVinLookups,
            Self::Export => LimitField::MonthlyExports,
            Self::Ai => LimitField::MonthlyAiAnalyses,
        }
    }

    /// Every limit field a store must satisfy before consuming one unit.
    /// Searches are capped both per day and per month.
    pub fn enforced_fields(&self) -> &'static [LimitField] {
        match self {
            Self::Search => &[LimitField::DailySearches, LimitField::MonthlySearches],
            Self::Vin => &[LimitField::MonthlyVinLookups],
            Self::Export => &[LimitField::MonthlyExports],
            Self::Ai => &[LimitField::MonthlyAiAnalyses],
        }
    }

    /// Plural noun used in messages ("searches", "VIN lookups", ...).
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Search => "searches",
            Self::Vin => "VIN lookups",
            Self::Export => "exports",
            Self::Ai => "AI analyses",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionCategory {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TierError::UnknownAction {
            action: s.to_string(),
        })
    }
}

/// One numeric limit on a capability record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitField {
    DailySearches,
    MonthlySearches,
    MonthlyVinLookups,
    MonthlyExports,
    MonthlyAiAnalyses,
}

impl LimitField {
    pub const ALL: [LimitField; 5] = [
        Self::DailySearches,
        Self::MonthlySearches,
        Self::MonthlyVinLookups,
        Self::MonthlyExports,
        Self::MonthlyAiAnalyses,
    ];

    /// Period whose counters this limit is compared against.
    pub fn period(&self) -> Period {
        match self {
            Self::DailySearches => Period::Daily,
            _ => Period::Monthly,
        }
    }

    /// Action whose counter this limit reads.
    pub fn action(&self) -> ActionCategory {
        match self {
            Self::DailySearches | Self::MonthlySearches => ActionCategory::Search,
            Self::MonthlyVinLookups => ActionCategory::Vin,
            Self::MonthlyExports => ActionCategory::Export,
            Self::MonthlyAiAnalyses => ActionCategory::Ai,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DailySearches => "daily_searches",
            Self::MonthlySearches => "monthly_searches",
            Self::MonthlyVinLookups => "monthly_vin_lookups",
            Self::MonthlyExports => "monthly_exports",
            Self::MonthlyAiAnalyses => "monthly_ai_analyses",
        }
    }

    /// Capitalised label for denial messages ("Daily search", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::DailySearches => "Daily search",
            Self::MonthlySearches => "Monthly search",
            Self::MonthlyVinLookups => "Monthly VIN lookup",
            Self::MonthlyExports => "Monthly export",
            Self::MonthlyAiAnalyses => "Monthly AI analysis",
        }
    }
}

impl fmt::Display for LimitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_mapping_is_total_and_consistent() {
        for action in ActionCategory::ALL {
            let field = action.limit_field();
            assert_eq!(field.action(), action);
            assert!(action.enforced_fields().contains(&field));
        }
    }

    #[test]
    fn every_limit_field_is_enforced_by_its_action() {
        for field in LimitField::ALL {
            assert!(field.action().enforced_fields().contains(&field));
        }
    }

    #[test]
    fn search_is_gated_daily() {
        assert_eq!(ActionCategory::Search.limit_field().period(), Period::Daily);
        assert_eq!(ActionCategory::Vin.limit_field().period(), Period::Monthly);
    }

    #[test]
    fn unknown_action_parse() {
        assert_eq!(ActionCategory::parse("delete"), None);
        assert!(matches!(
            "delete".parse::<ActionCategory>(),
            Err(TierError::UnknownAction { .. })
        ));
    }
}
