//! Tier Capability Table tests.
//!
//! - Table contents per tier
//! - Unknown tiers are errors, never defaults
//! - platinum and admin are quota-identical

use tiergate_core::errors::error_code;
use tiergate_core::tiers::standard::record_for;
use tiergate_core::{
    lookup_capability, Feature, GateErrorCode, Limit, LimitField, Tier, TierError, TierTable,
};

// ============================================================
// Table contents
// ============================================================

#[test]
fn freemium_is_heavily_capped() {
    let r = lookup_capability("freemium").unwrap();
    assert_eq!(r.tier, Tier::Freemium);
    assert_eq!(r.daily_searches, Limit::Finite(10));
    assert_eq!(r.monthly_searches, Limit::Finite(100));
    assert_eq!(r.monthly_vin_lookups, Limit::Finite(5));
    assert_eq!(r.monthly_exports, Limit::Finite(0));
    assert_eq!(r.monthly_ai_analyses, Limit::Finite(3));
}

#[test]
fn basic_and_gold_limits() {
    let basic = lookup_capability("basic").unwrap();
    assert_eq!(basic.daily_searches, Limit::Finite(50));
    assert_eq!(basic.monthly_exports, Limit::Finite(10));

    let gold = lookup_capability("gold").unwrap();
    assert_eq!(gold.daily_searches, Limit::Finite(200));
    assert_eq!(gold.monthly_vin_lookups, Limit::Finite(250));
    assert_eq!(gold.monthly_ai_analyses, Limit::Finite(100));
}

#[test]
fn platinum_and_admin_are_fully_unlimited() {
    for id in ["platinum", "admin"] {
        let r = lookup_capability(id).unwrap();
        assert!(r.is_unlimited(), "{id} should be unlimited");
        for field in LimitField::ALL {
            assert_eq!(r.limit(field), Limit::Unlimited, "{id} {field}");
        }
        for feature in Feature::ALL {
            assert_eq!(r.flag(feature), Some(true), "{id} {:?}", feature);
        }
    }
}

#[test]
fn platinum_and_admin_differ_only_in_tier() {
    let mut admin = record_for(Tier::Admin);
    admin.tier = Tier::Platinum;
    assert_eq!(admin, record_for(Tier::Platinum));
}

#[test]
fn gold_flags() {
    let gold = lookup_capability("gold").unwrap();
    assert_eq!(gold.flag(Feature::ApiAccess), Some(false));
    assert_eq!(gold.flag(Feature::BulkExport), Some(true));
    assert_eq!(gold.flag(Feature::PrioritySupport), Some(false));
}

#[test]
fn features_for_tier_grow_with_rank() {
    let table = TierTable::standard();
    let counts: Vec<usize> = [Tier::Freemium, Tier::Basic, Tier::Gold, Tier::Platinum]
        .iter()
        .map(|t| table.features_for(*t).len())
        .collect();
    assert_eq!(counts, vec![1, 3, 6, 8]);
}

// ============================================================
// Unknown tiers
// ============================================================

#[test]
fn unconfigured_tier_is_error() {
    let err = lookup_capability("enterprise").unwrap_err();
    assert_eq!(
        err,
        TierError::UnknownTier {
            tier: "enterprise".to_string()
        }
    );
    assert!(err.is_server_fault());
    assert_eq!(err.error_code(), error_code::TIER_UNKNOWN);
}

#[test]
fn near_miss_tier_ids_are_errors() {
    for id in ["", "Gold", "GOLD", "gold ", "premium", "free"] {
        assert!(lookup_capability(id).is_err(), "'{id}' must not resolve");
    }
}

#[test]
fn custom_table_missing_tier_reports_lookup_error() {
    let table = TierTable::standard();
    assert!(table.get(Tier::Gold).is_ok());

    let err = TierTable::from_records(vec![record_for(Tier::Gold)]).unwrap_err();
    assert_eq!(err.error_code(), error_code::TIER_TABLE_INCOMPLETE);
}

#[test]
fn from_records_accepts_one_record_per_tier() {
    let table = TierTable::from_records(Tier::ALL.iter().map(|t| record_for(*t))).unwrap();
    assert_eq!(table.len(), Tier::ALL.len());
}

#[test]
fn from_records_rejects_duplicate_tier_even_when_complete() {
    let mut records: Vec<_> = Tier::ALL.iter().map(|t| record_for(*t)).collect();
    let mut second_gold = record_for(Tier::Gold);
    second_gold.daily_searches = Limit::Unlimited;
    records.push(second_gold);

    let err = TierTable::from_records(records).unwrap_err();
    assert_eq!(
        err,
        TierError::DuplicateTier {
            tier: "gold".to_string()
        }
    );
    assert!(err.is_server_fault());
    assert_eq!(err.error_code(), error_code::TIER_TABLE_DUPLICATE);
}
