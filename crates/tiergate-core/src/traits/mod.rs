pub mod usage_store;

pub use usage_store::{evaluate_consume, IUsageStore};
