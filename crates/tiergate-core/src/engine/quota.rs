//! Remaining-quota computation.

use crate::types::{
    ActionCategory, CapabilityRecord, Limit, LimitField, LimitStatus, Period, Quota,
    UsageCounters, UsageSummary,
};

/// `Quota::Unlimited` for an unlimited limit, else `max(0, limit - used)`.
///
/// `used` is the raw counter value for the limit's action, i.e.
/// `counters.used(field.action())`. Use [`remaining_for_field`] to pass the
/// counter set directly.
pub fn remaining_quota(used: u64, limit: Limit) -> Quota {
    limit.remaining(used)
}

/// Remaining quota on `field`, reading the matching counter from `counters`.
/// `counters` must be the set for `field.period()`.
pub fn remaining_for_field(
    capability: &CapabilityRecord,
    counters: &UsageCounters,
    field: LimitField,
) -> Quota {
    remaining_quota(counters.used(field.action()), capability.limit(field))
}

/// Remaining quota for `action` under `capability`.
pub fn remaining_for_action(
    capability: &CapabilityRecord,
    counters: &UsageCounters,
    action: ActionCategory,
) -> Quota {
    remaining_for_field(capability, counters, action.limit_field())
}

/// One status per limit field, in `LimitField::ALL` order. Daily fields read
/// `daily`, monthly fields read `monthly`.
pub fn usage_summary(
    capability: &CapabilityRecord,
    daily: &UsageCounters,
    monthly: &UsageCounters,
) -> UsageSummary {
    let statuses = LimitField::ALL
        .iter()
        .map(|field| {
            let counters = match field.period() {
                Period::Daily => daily,
                Period::Monthly => monthly,
            };
            let limit = capability.limit(*field);
            let used = counters.used(field.action());
            LimitStatus {
                field: *field,
                limit,
                used,
                remaining: remaining_quota(used, limit),
            }
        })
        .collect();
    UsageSummary { statuses }
}
