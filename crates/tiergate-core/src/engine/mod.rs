//! Usage Decision Engine.
//!
//! Pure, synchronous functions over a `CapabilityRecord` and `UsageCounters`.
//! No clock, no shared state, safe to call from any thread. Every check here
//! is advisory: the authoritative check-and-increment lives behind
//! `traits::IUsageStore::try_consume`.

pub mod actions;
pub mod features;
pub mod quota;

pub use actions::{can_perform_action, check_limit, denial_message};
pub use features::{check_feature, has_feature, FeatureAccess};
pub use quota::{remaining_for_action, remaining_for_field, remaining_quota, usage_summary};
