//! Capability records: the numeric limits and feature flags of one tier.

use serde::{Deserialize, Serialize};

use super::action::LimitField;
use super::collections::FxHashMap;
use super::feature::Feature;
use super::limit::Limit;
use super::tier::Tier;

/// Limits and feature flags granted by a tier.
///
/// Features missing from `features` are disabled. New features therefore ship
/// off for every existing tier until a record lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    pub tier: Tier,
    pub daily_searches: Limit,
    pub monthly_searches: Limit,
    pub monthly_vin_lookups: Limit,
    pub monthly_exports: Limit,
    pub monthly_ai_analyses: Limit,
    pub features: FxHashMap<Feature, bool>,
}

impl CapabilityRecord {
    /// The limit stored under `field`.
    pub fn limit(&self, field: LimitField) -> Limit {
        match field {
            LimitField::DailySearches => self.daily_searches,
            LimitField::MonthlySearches => self.monthly_searches,
            LimitField::MonthlyVinLookups => self.monthly_vin_lookups,
            LimitField::MonthlyExports => self.monthly_exports,
            LimitField::MonthlyAiAnalyses => self.monthly_ai_analyses,
        }
    }

    /// Explicit flag for `feature`, `None` when the record does not list it.
    pub fn flag(&self, feature: Feature) -> Option<bool> {
        self.features.get(&feature).copied()
    }

    /// Whether every limit is unlimited.
    pub fn is_unlimited(&self) -> bool {
        LimitField::ALL.iter().all(|f| self.limit(*f).is_unlimited())
    }

    /// Whether this record grants at least everything `other` grants.
    pub fn dominates(&self, other: &CapabilityRecord) -> bool {
        let limits = LimitField::ALL
            .iter()
            .all(|f| self.limit(*f).covers(&other.limit(*f)));
        let flags = Feature::ALL
            .iter()
            .all(|f| !other.flag(*f).unwrap_or(false) || self.flag(*f).unwrap_or(false));
        limits && flags
    }
}
