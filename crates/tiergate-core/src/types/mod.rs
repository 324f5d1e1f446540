pub mod action;
pub mod capability;
pub mod collections;
pub mod decision;
pub mod feature;
pub mod limit;
pub mod tier;
pub mod usage;

pub use action::{ActionCategory, LimitField, Period};
pub use capability::CapabilityRecord;
pub use decision::{ConsumeOutcome, Decision, LimitStatus, UsageSummary};
pub use feature::Feature;
pub use limit::{Limit, Quota};
pub use tier::Tier;
pub use usage::UsageCounters;
