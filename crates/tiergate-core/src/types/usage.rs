//! Per-account, per-period usage counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::{ActionCategory, Period};

/// Counters for one account in the current tracking period.
///
/// Owned and mutated by the persistence layer. The decision engine only reads
/// them and assumes the caller has already rolled them to the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    pub period: Period,
    pub searches: u64,
    pub ai_analyses: u64,
    pub vin_searches: u64,
    pub exports: u64,
    /// Start of the period these counters belong to.
    pub last_reset: DateTime<Utc>,
    /// Start of the first period in this account's cycle. Rolling periods are
    /// counted from here, so a month clamped to a shorter one (Jan 31 ->
    /// Feb 28) is not carried into later months.
    pub cycle_anchor: DateTime<Utc>,
}

impl UsageCounters {
    /// Zeroed counters for an account with no recorded usage. The first
    /// period start doubles as the cycle anchor.
    pub fn fresh(period: Period, last_reset: DateTime<Utc>) -> Self {
        Self {
            period,
            searches: 0,
            ai_analyses: 0,
            vin_searches: 0,
            exports: 0,
            last_reset,
            cycle_anchor: last_reset,
        }
    }

    /// Zeroed counters for the period starting at `start`, same cycle.
    pub fn next_period(&self, start: DateTime<Utc>) -> Self {
        Self {
            cycle_anchor: self.cycle_anchor,
            ..Self::fresh(self.period, start)
        }
    }

    /// Counter value backing `action`.
    pub fn used(&self, action: ActionCategory) -> u64 {
        match action {
            ActionCategory::Search => self.searches,
            ActionCategory::Vin => self.vin_searches,
            ActionCategory::Export => self.exports,
            ActionCategory::Ai => self.ai_analyses,
        }
    }

    /// Copy with the counter backing `action` set to `value`.
    pub fn with_used(mut self, action: ActionCategory, value: u64) -> Self {
        *self.counter_mut(action) = value;
        self
    }

    /// Mutable access for store implementations.
    pub fn counter_mut(&mut self, action: ActionCategory) -> &mut u64 {
        match action {
            ActionCategory::Search => &mut self.searches,
            ActionCategory::Vin => &mut self.vin_searches,
            ActionCategory::Export => &mut self.exports,
            ActionCategory::Ai => &mut self.ai_analyses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.searches == 0 && self.ai_analyses == 0 && self.vin_searches == 0 && self.exports == 0
    }
}
