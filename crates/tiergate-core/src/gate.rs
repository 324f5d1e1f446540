//! QuotaGate: tier lookup, advisory checks and authoritative consumption
//! behind one handle for request middleware.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::GatingConfig;
use crate::engine::{self, FeatureAccess};
use crate::errors::GateResult;
use crate::tiers::TierTable;
use crate::traits::IUsageStore;
use crate::types::{
    ActionCategory, CapabilityRecord, ConsumeOutcome, Decision, Feature, Period, Quota,
    UsageSummary,
};

/// Composes the tier table, decision engine and a usage store.
///
/// `check_*` are advisory and may race with concurrent requests.
/// `consume` is the enforcement point.
pub struct QuotaGate<S: IUsageStore> {
    table: &'static TierTable,
    store: S,
    config: GatingConfig,
}

impl<S: IUsageStore> QuotaGate<S> {
    /// Gate over the global tier table.
    pub fn new(store: S, config: GatingConfig) -> Self {
        Self::with_table(TierTable::global(), store, config)
    }

    pub fn with_table(table: &'static TierTable, store: S, config: GatingConfig) -> Self {
        Self {
            table,
            store,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn table(&self) -> &'static TierTable {
        self.table
    }

    /// Resolve `tier_id`. Unknown tiers propagate as `GateError::Tier`.
    pub fn capability(&self, tier_id: &str) -> GateResult<CapabilityRecord> {
        Ok(self.table.lookup(tier_id)?)
    }

    /// Advisory: would `action` be allowed right now?
    pub fn check_action(
        &self,
        tier_id: &str,
        account: &str,
        action: ActionCategory,
        now: DateTime<Utc>,
    ) -> GateResult<Decision> {
        let capability = self.capability(tier_id)?;
        let field = action.limit_field();

        // Every enforced field must pass, not only the primary one.
        for enforced in action.enforced_fields() {
            if capability.limit(*enforced).is_unlimited() {
                continue;
            }
            let counters = self.store.current_counters(account, enforced.period(), now)?;
            let decision = engine::check_limit(&capability, &counters, *enforced);
            if !decision.allowed {
                info!(account, tier = tier_id, field = enforced.as_str(), "action denied");
                return Ok(decision);
            }
        }
        Ok(Decision::allow(action, field, capability.limit(field)))
    }

    /// Remaining quota on the primary limit of `action`.
    pub fn remaining(
        &self,
        tier_id: &str,
        account: &str,
        action: ActionCategory,
        now: DateTime<Utc>,
    ) -> GateResult<Quota> {
        let capability = self.capability(tier_id)?;
        if capability.limit(action.limit_field()).is_unlimited() {
            return Ok(Quota::Unlimited);
        }
        let counters = self
            .store
            .current_counters(account, action.limit_field().period(), now)?;
        Ok(engine::remaining_for_action(&capability, &counters, action))
    }

    /// Feature check with upgrade messaging.
    pub fn check_feature(&self, tier_id: &str, feature: Feature) -> GateResult<FeatureAccess> {
        let capability = self.capability(tier_id)?;
        Ok(engine::check_feature(
            self.table,
            &capability,
            feature,
            self.config.effective_upgrade_url(),
        ))
    }

    /// Authoritative: record one completed `action`, or refuse if a cap is hit.
    /// Call after the action succeeds.
    pub fn consume(
        &self,
        tier_id: &str,
        account: &str,
        action: ActionCategory,
        now: DateTime<Utc>,
    ) -> GateResult<ConsumeOutcome> {
        let capability = self.capability(tier_id)?;
        let outcome = self.store.try_consume(account, action, &capability, now)?;
        if let ConsumeOutcome::LimitReached { field, limit } = outcome {
            warn!(
                account,
                tier = tier_id,
                field = field.as_str(),
                limit,
                "consume refused: limit reached"
            );
        }
        Ok(outcome)
    }

    /// Usage meters for every limit field.
    pub fn summary(
        &self,
        tier_id: &str,
        account: &str,
        now: DateTime<Utc>,
    ) -> GateResult<UsageSummary> {
        let capability = self.capability(tier_id)?;
        let daily = self.store.current_counters(account, Period::Daily, now)?;
        let monthly = self.store.current_counters(account, Period::Monthly, now)?;
        Ok(engine::usage_summary(&capability, &daily, &monthly))
    }
}
