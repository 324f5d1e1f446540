//! TierTable: immutable tier → capability mapping, built once per process.

use std::sync::OnceLock;

use tracing::warn;

use crate::errors::TierError;
use crate::types::collections::FxHashMap;
use crate::types::{CapabilityRecord, Feature, Tier};

use super::standard;

static GLOBAL: OnceLock<TierTable> = OnceLock::new();

/// Read-only tier → capability table. No mutation path after construction.
#[derive(Debug, Clone)]
pub struct TierTable {
    records: FxHashMap<Tier, CapabilityRecord>,
}

impl TierTable {
    /// The shipped table: one record per `Tier`.
    pub fn standard() -> Self {
        Self {
            records: Tier::ALL
                .iter()
                .map(|t| (*t, standard::record_for(*t)))
                .collect(),
        }
    }

    /// Build a table from explicit records and validate it.
    ///
    /// Each tier may appear once; a second record for the same tier is
    /// `TierError::DuplicateTier`, never a silent overwrite.
    pub fn from_records(
        records: impl IntoIterator<Item = CapabilityRecord>,
    ) -> Result<Self, TierError> {
        let mut map = FxHashMap::default();
        for record in records {
            let tier = record.tier;
            if map.insert(tier, record).is_some() {
                return Err(TierError::DuplicateTier {
                    tier: tier.as_str().to_string(),
                });
            }
        }
        let table = Self { records: map };
        table.validate()?;
        Ok(table)
    }

    /// Process-wide shared table, built on first use.
    pub fn global() -> &'static TierTable {
        GLOBAL.get_or_init(Self::standard)
    }

    /// Every tier must have a record.
    pub fn validate(&self) -> Result<(), TierError> {
        let missing: Vec<&str> = Tier::ALL
            .iter()
            .filter(|t| !self.records.contains_key(t))
            .map(|t| t.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(TierError::TableIncomplete {
                details: format!("no record for {}", missing.join(", ")),
            });
        }
        Ok(())
    }

    /// Resolve a tier wire id to a copy of its record.
    ///
    /// Unknown ids fail with `TierError::UnknownTier`: they are never mapped to
    /// a zero-capability or unlimited default.
    pub fn lookup(&self, tier_id: &str) -> Result<CapabilityRecord, TierError> {
        let tier = Tier::parse(tier_id).ok_or_else(|| {
            warn!(tier = tier_id, "capability lookup for unconfigured tier");
            TierError::UnknownTier {
                tier: tier_id.to_string(),
            }
        })?;
        self.get(tier)
    }

    /// Record for a typed tier.
    pub fn get(&self, tier: Tier) -> Result<CapabilityRecord, TierError> {
        self.records
            .get(&tier)
            .cloned()
            .ok_or_else(|| TierError::UnknownTier {
                tier: tier.as_str().to_string(),
            })
    }

    /// Lowest purchasable tier whose record enables `feature`.
    pub fn min_tier_for(&self, feature: Feature) -> Option<Tier> {
        Tier::ALL
            .iter()
            .copied()
            .filter(|t| t.is_purchasable())
            .filter(|t| {
                self.records
                    .get(t)
                    .is_some_and(|r| r.flag(feature).unwrap_or(false))
            })
            .min_by_key(|t| t.rank())
    }

    /// All features enabled for `tier`, in `Feature::ALL` order.
    pub fn features_for(&self, tier: Tier) -> Vec<Feature> {
        let Some(record) = self.records.get(&tier) else {
            return Vec::new();
        };
        Feature::ALL
            .iter()
            .copied()
            .filter(|f| record.flag(*f).unwrap_or(false))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Look up a tier in the global table.
pub fn lookup_capability(tier_id: &str) -> Result<CapabilityRecord, TierError> {
    TierTable::global().lookup(tier_id)
}
