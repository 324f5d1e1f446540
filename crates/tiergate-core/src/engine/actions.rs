//! Advisory action checks.

use tracing::{debug, warn};

use crate::types::{ActionCategory, CapabilityRecord, Decision, Limit, LimitField, UsageCounters};

/// Decide whether `action` is permitted for `capability` given `counters`.
///
/// Unlimited limits allow unconditionally without reading the counter.
/// Finite limits allow while `used < limit`. Pure: nothing is incremented,
/// and the result is advisory. Enforcement happens in
/// `IUsageStore::try_consume`.
pub fn can_perform_action(
    capability: &CapabilityRecord,
    counters: &UsageCounters,
    action: ActionCategory,
) -> Decision {
    check_limit(capability, counters, action.limit_field())
}

/// Same rule as `can_perform_action`, against any limit field.
///
/// `counters` must be the set for `field.period()`.
pub fn check_limit(
    capability: &CapabilityRecord,
    counters: &UsageCounters,
    field: LimitField,
) -> Decision {
    let action = field.action();
    let limit = capability.limit(field);

    let Limit::Finite(max) = limit else {
        return Decision::allow(action, field, limit);
    };

    if counters.period != field.period() {
        warn!(
            field = field.as_str(),
            expected = field.period().as_str(),
            got = counters.period.as_str(),
            "limit checked against counters from another period"
        );
    }

    let used = counters.used(action);
    if limit.permits(used) {
        debug!(tier = %capability.tier, action = action.as_str(), used, max, "action allowed");
        Decision::allow(action, field, limit)
    } else {
        debug!(tier = %capability.tier, action = action.as_str(), used, max, "action denied");
        Decision::deny(action, field, limit, denial_message(field, max))
    }
}

/// "Daily search limit of 10 reached. Upgrade your plan for more searches."
pub fn denial_message(field: LimitField, max: u64) -> String {
    format!(
        "{} limit of {} reached. Upgrade your plan for more {}.",
        field.label(),
        max,
        field.action().noun()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::TierTable;
    use crate::types::Period;
    use chrono::{TimeZone, Utc};

    fn daily(searches: u64) -> UsageCounters {
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        UsageCounters::fresh(Period::Daily, t).with_used(ActionCategory::Search, searches)
    }

    #[test]
    fn message_names_limit_and_action() {
        let msg = denial_message(LimitField::MonthlyVinLookups, 5);
        assert_eq!(msg, "Monthly VIN lookup limit of 5 reached. Upgrade your plan for more VIN lookups.");
    }

    #[test]
    fn allowed_decision_has_no_message() {
        let gold = TierTable::standard().lookup("gold").unwrap();
        let d = can_perform_action(&gold, &daily(0), ActionCategory::Search);
        assert!(d.allowed);
        assert!(d.message.is_none());
    }

    #[test]
    fn monthly_search_cap_checked_separately() {
        let freemium = TierTable::standard().lookup("freemium").unwrap();
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let monthly =
            UsageCounters::fresh(Period::Monthly, t).with_used(ActionCategory::Search, 100);
        let d = check_limit(&freemium, &monthly, LimitField::MonthlySearches);
        assert!(!d.allowed);
        assert!(d.message.unwrap().contains("100"));
    }
}
