//! # tiergate-core
//!
//! Usage-quota and permission gating for subscription tiers.
//! Defines the tier capability table, the usage decision engine, errors,
//! config, tracing setup, and the usage-store seam that persistence
//! layers implement.

pub mod config;
pub mod engine;
pub mod errors;
pub mod gate;
pub mod memory_store;
pub mod period;
pub mod tiers;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::GateConfig;
pub use engine::{
    can_perform_action, check_feature, has_feature, remaining_quota, FeatureAccess,
};
pub use errors::{GateError, GateErrorCode, GateResult, TierError};
pub use gate::QuotaGate;
pub use memory_store::InMemoryUsageStore;
pub use period::ResetPolicy;
pub use tiers::{lookup_capability, TierTable};
pub use traits::IUsageStore;
pub use types::{
    ActionCategory, CapabilityRecord, ConsumeOutcome, Decision, Feature, Limit, LimitField,
    Period, Quota, Tier, UsageCounters, UsageSummary,
};
