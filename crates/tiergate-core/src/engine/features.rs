//! Feature checks and upgrade messaging.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tiers::TierTable;
use crate::types::{CapabilityRecord, Feature, Tier};

/// Flag value for `feature`. Features the record does not list are disabled.
pub fn has_feature(capability: &CapabilityRecord, feature: Feature) -> bool {
    capability.flag(feature).unwrap_or(false)
}

/// Result of a feature gate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "access")]
pub enum FeatureAccess {
    Allowed,
    Denied {
        feature: Feature,
        current_tier: Tier,
        /// Lowest purchasable tier that unlocks the feature, if any does.
        required_tier: Option<Tier>,
        upgrade_url: String,
    },
}

impl FeatureAccess {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn denial_message(&self) -> Option<String> {
        match self {
            Self::Allowed => None,
            Self::Denied {
                feature,
                required_tier: Some(required),
                upgrade_url,
                ..
            } => Some(format!(
                "{} requires the {} plan. Upgrade at {}",
                feature.description(),
                required.label(),
                upgrade_url
            )),
            Self::Denied {
                feature,
                required_tier: None,
                ..
            } => Some(format!("{} is not available on any plan.", feature.description())),
        }
    }
}

/// Check `feature` for `capability`, naming the unlocking tier on denial.
pub fn check_feature(
    table: &TierTable,
    capability: &CapabilityRecord,
    feature: Feature,
    upgrade_url: &str,
) -> FeatureAccess {
    if has_feature(capability, feature) {
        return FeatureAccess::Allowed;
    }
    let required_tier = table.min_tier_for(feature);
    debug!(
        tier = %capability.tier,
        feature = feature.as_str(),
        required = required_tier.map(|t| t.as_str()),
        "feature denied"
    );
    FeatureAccess::Denied {
        feature,
        current_tier: capability.tier,
        required_tier,
        upgrade_url: upgrade_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_names_unlocking_tier() {
        let table = TierTable::standard();
        let basic = table.lookup("basic").unwrap();
        let access = check_feature(&table, &basic, Feature::BulkExport, "https://x.test/pricing");
        assert!(!access.is_allowed());
        let msg = access.denial_message().unwrap();
        assert!(msg.contains("Gold"), "{msg}");
        assert!(msg.contains("https://x.test/pricing"));
    }

    #[test]
    fn allowed_has_no_message() {
        let table = TierTable::standard();
        let gold = table.lookup("gold").unwrap();
        let access = check_feature(&table, &gold, Feature::BulkExport, "/pricing");
        assert_eq!(access, FeatureAccess::Allowed);
        assert!(access.denial_message().is_none());
    }

    #[test]
    fn unlisted_feature_is_disabled() {
        let freemium = TierTable::standard().lookup("freemium").unwrap();
        assert_eq!(freemium.flag(Feature::PriceAlerts), None);
        assert!(!has_feature(&freemium, Feature::PriceAlerts));
    }
}
