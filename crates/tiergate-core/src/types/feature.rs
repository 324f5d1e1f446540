//! 8 gated features.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TierError;

/// All features a capability record can flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    BasicSearch,
    AdvancedFilters,
    PriceAlerts,
    BulkExport,
    ApiAccess,
    PrioritySupport,
    CustomReports,
    CrossPlatformAccess,
}

impl Feature {
    /// All 8 features.
    pub const ALL: [Feature; 8] = [
        Self::BasicSearch,
        Self::AdvancedFilters,
        Self::PriceAlerts,
        Self::BulkExport,
        Self::ApiAccess,
        Self::PrioritySupport,
        Self::CustomReports,
        Self::CrossPlatformAccess,
    ];

    /// Feature name as string (for config, logging, API payloads).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicSearch => "basic_search",
            Self::AdvancedFilters => "advanced_filters",
            Self::PriceAlerts => "price_alerts",
            Self::BulkExport => "bulk_export",
            Self::ApiAccess => "api_access",
            Self::PrioritySupport => "priority_support",
            Self::CustomReports => "custom_reports",
            Self::CrossPlatformAccess => "cross_platform_access",
        }
    }

    /// Parse feature from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic_search" => Some(Self::BasicSearch),
            "advanced_filters" => Some(Self::AdvancedFilters),
            "price_alerts" => Some(Self::PriceAlerts),
            "bulk_export" => Some(Self::BulkExport),
            "api_access" => Some(Self::ApiAccess),
            "priority_support" => Some(Self::PrioritySupport),
            "custom_reports" => Some(Self::CustomReports),
            "cross_platform_access" => Some(Self::CrossPlatformAccess),
            _ => None,
        }
    }

    /// Human-readable name for upgrade messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::BasicSearch => "Basic auction search",
            Self::AdvancedFilters => "Advanced search filters",
            Self::PriceAlerts => "Price alerts",
            Self::BulkExport => "Bulk export",
            Self::ApiAccess => "API access",
            Self::PrioritySupport => "Priority support",
            Self::CustomReports => "Custom reports",
            Self::CrossPlatformAccess => "Cross-platform access",
        }
    }
}

impl FromStr for Feature {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TierError::UnknownFeature {
            feature: s.to_string(),
        })
    }
}
