//! In-process usage store.
//!
//! Each account's daily and monthly sets live in one `DashMap` entry; holding
//! the entry guard makes roll + check + increment atomic per account.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::errors::StorageError;
use crate::period::{initial_period_start, roll_forward, ResetPolicy};
use crate::traits::usage_store::{evaluate_consume, IUsageStore};
use crate::types::{ActionCategory, CapabilityRecord, ConsumeOutcome, Period, UsageCounters};

#[derive(Debug, Clone)]
struct AccountUsage {
    daily: UsageCounters,
    monthly: UsageCounters,
}

impl AccountUsage {
    fn new(policy: ResetPolicy, now: DateTime<Utc>) -> Self {
        Self {
            daily: UsageCounters::fresh(Period::Daily, initial_period_start(policy, Period::Daily, now)),
            monthly: UsageCounters::fresh(
                Period::Monthly,
                initial_period_start(policy, Period::Monthly, now),
            ),
        }
    }

    fn roll(&mut self, policy: ResetPolicy, now: DateTime<Utc>) {
        self.daily = roll_forward(policy, &self.daily, now);
        self.monthly = roll_forward(policy, &self.monthly, now);
    }

    fn set(&self, period: Period) -> &UsageCounters {
        match period {
            Period::Daily => &self.daily,
            Period::Monthly => &self.monthly,
        }
    }
}

/// Thread-safe in-memory `IUsageStore`. Counters are lost on drop.
#[derive(Debug)]
pub struct InMemoryUsageStore {
    policy: ResetPolicy,
    accounts: DashMap<String, AccountUsage>,
}

impl InMemoryUsageStore {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            policy,
            accounts: DashMap::new(),
        }
    }

    /// Number of accounts with recorded usage.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl IUsageStore for InMemoryUsageStore {
    fn current_counters(
        &self,
        account: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<UsageCounters, StorageError> {
        let Some(mut entry) = self.accounts.get_mut(account) else {
            return Ok(UsageCounters::fresh(
                period,
                initial_period_start(self.policy, period, now),
            ));
        };
        entry.roll(self.policy, now);
        Ok(entry.set(period).clone())
    }

    fn try_consume(
        &self,
        account: &str,
        action: ActionCategory,
        capability: &CapabilityRecord,
        now: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, StorageError> {
        let mut entry = self
            .accounts
            .entry(account.to_string())
            .or_insert_with(|| AccountUsage::new(self.policy, now));
        entry.roll(self.policy, now);

        if let Some(refused) = evaluate_consume(action, capability, &entry.daily, &entry.monthly) {
            info!(account, action = action.as_str(), ?refused, "consume refused");
            return Ok(refused);
        }

        let daily = entry.daily.counter_mut(action);
        *daily = daily.saturating_add(1);
        let monthly = entry.monthly.counter_mut(action);
        *monthly = monthly.saturating_add(1);
        let used_after = entry.set(action.limit_field().period()).used(action);
        debug!(account, action = action.as_str(), used_after, "consumed");
        Ok(ConsumeOutcome::Consumed { used_after })
    }

    fn reset_account(&self, account: &str) -> Result<(), StorageError> {
        self.accounts.remove(account);
        Ok(())
    }

    fn reset_policy(&self) -> ResetPolicy {
        self.policy
    }
}
