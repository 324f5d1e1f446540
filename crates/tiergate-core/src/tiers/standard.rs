//! The built-in capability records.
//!
//! | Tier | Searches/day | Searches/mo | VIN/mo | Exports/mo | AI/mo |
//! |------|--------------|-------------|--------|------------|-------|
//! | freemium | 10 | 100 | 5 | 0 | 3 |
//! | basic | 50 | 1 000 | 50 | 10 | 25 |
//! | gold | 200 | 5 000 | 250 | 100 | 100 |
//! | platinum | unlimited | unlimited | unlimited | unlimited | unlimited |
//! | admin | unlimited | unlimited | unlimited | unlimited | unlimited |

use crate::types::collections::FxHashMap;
use crate::types::{CapabilityRecord, Feature, Limit, Tier};

use Limit::{Finite, Unlimited};

// ── Feature grants ─────────────────────────────────────────────

/// Freemium lists only what it grants. Everything else is absent, so off.
const FREEMIUM_FEATURES: &[(Feature, bool)] = &[(Feature::BasicSearch, true)];

const BASIC_FEATURES: &[(Feature, bool)] = &[
    (Feature::BasicSearch, true),
    (Feature::AdvancedFilters, true),
    (Feature::PriceAlerts, true),
    (Feature::CrossPlatformAccess, false),
    (Feature::BulkExport, false),
    (Feature::CustomReports, false),
    (Feature::PrioritySupport, false),
    (Feature::ApiAccess, false),
];

const GOLD_FEATURES: &[(Feature, bool)] = &[
    (Feature::BasicSearch, true),
    (Feature::AdvancedFilters, true),
    (Feature::PriceAlerts, true),
    (Feature::CrossPlatformAccess, true),
    (Feature::BulkExport, true),
    (Feature::CustomReports, true),
    (Feature::PrioritySupport, false),
    (Feature::ApiAccess, false),
];

fn flags(grants: &[(Feature, bool)]) -> FxHashMap<Feature, bool> {
    grants.iter().copied().collect()
}

fn all_flags() -> FxHashMap<Feature, bool> {
    Feature::ALL.iter().map(|f| (*f, true)).collect()
}

/// Capability record for `tier` as shipped.
pub fn record_for(tier: Tier) -> CapabilityRecord {
    match tier {
        Tier::Freemium => CapabilityRecord {
            tier,
            daily_searches: Finite(10),
            monthly_searches: Finite(100),
            monthly_vin_lookups: Finite(5),
            monthly_exports: Finite(0),
            monthly_ai_analyses: Finite(3),
            features: flags(FREEMIUM_FEATURES),
        },
        Tier::Basic => CapabilityRecord {
            tier,
            daily_searches: Finite(50),
            monthly_searches: Finite(1_000),
            monthly_vin_lookups: Finite(50),
            monthly_exports: Finite(10),
            monthly_ai_analyses: Finite(25),
            features: flags(BASIC_FEATURES),
        },
        Tier::Gold => CapabilityRecord {
            tier,
            daily_searches: Finite(200),
            monthly_searches: Finite(5_000),
            monthly_vin_lookups: Finite(250),
            monthly_exports: Finite(100),
            monthly_ai_analyses: Finite(100),
            features: flags(GOLD_FEATURES),
        },
        // Admin is quota-identical to platinum. Staff-only affordances
        // (impersonation, audit) live outside the capability table.
        Tier::Platinum | Tier::Admin => CapabilityRecord {
            tier,
            daily_searches: Unlimited,
            monthly_searches: Unlimited,
            monthly_vin_lookups: Unlimited,
            monthly_exports: Unlimited,
            monthly_ai_analyses: Unlimited,
            features: all_flags(),
        },
    }
}
