//! `IUsageStore` trait: the authoritative half of the two-phase quota contract.
//!
//! Phase 1 is the advisory `engine::can_perform_action`: fast, lock-free, fine
//! for rendering. It can race: two requests may both see one unit left.
//! Phase 2 is `try_consume` here: a single atomic check-and-increment that
//! never lets a finite counter pass its limit. Callers invoke it after the
//! action has actually succeeded, so failed actions are not charged.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::StorageError;
use crate::period::ResetPolicy;
use crate::types::{ActionCategory, CapabilityRecord, ConsumeOutcome, Period, UsageCounters};

/// Persistence of per-account usage counters.
///
/// Every action is counted in both the daily and the monthly set. Stores roll
/// a set to the current period (per `reset_policy`) before reading or
/// incrementing it.
pub trait IUsageStore: Send + Sync {
    /// Counters for `account` in the `period` set containing `now`.
    /// Accounts with no history get zeroed counters.
    fn current_counters(
        &self,
        account: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<UsageCounters, StorageError>;

    /// Atomically record one `action` if every limit in
    /// `action.enforced_fields()` is still below its cap.
    fn try_consume(
        &self,
        account: &str,
        action: ActionCategory,
        capability: &CapabilityRecord,
        now: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, StorageError>;

    /// Drop all counters for `account`.
    fn reset_account(&self, account: &str) -> Result<(), StorageError>;

    /// Period boundary policy this store applies.
    fn reset_policy(&self) -> ResetPolicy;
}

impl<T: IUsageStore + ?Sized> IUsageStore for Arc<T> {
    fn current_counters(
        &self,
        account: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<UsageCounters, StorageError> {
        (**self).current_counters(account, period, now)
    }

    fn try_consume(
        &self,
        account: &str,
        action: ActionCategory,
        capability: &CapabilityRecord,
        now: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, StorageError> {
        (**self).try_consume(account, action, capability, now)
    }

    fn reset_account(&self, account: &str) -> Result<(), StorageError> {
        (**self).reset_account(account)
    }

    fn reset_policy(&self) -> ResetPolicy {
        (**self).reset_policy()
    }
}

/// Decide a consume against already-rolled counter sets.
///
/// Shared by store implementations so every store applies the same rule:
/// the first enforced field at its cap refuses the whole consume.
pub fn evaluate_consume(
    action: ActionCategory,
    capability: &CapabilityRecord,
    daily: &UsageCounters,
    monthly: &UsageCounters,
) -> Option<ConsumeOutcome> {
    action.enforced_fields().iter().find_map(|field| {
        let counters = match field.period() {
            Period::Daily => daily,
            Period::Monthly => monthly,
        };
        let limit = capability.limit(*field);
        match limit.finite() {
            Some(max) if !limit.permits(counters.used(action)) => {
                Some(ConsumeOutcome::LimitReached { field: *field, limit: max })
            }
            _ => None,
        }
    })
}
