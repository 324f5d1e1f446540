//! Tier Capability Table: 5 tiers, 5 numeric limits, 8 feature flags.
//!
//! ## Tiers
//! - **freemium**: heavily capped, basic search only
//! - **basic**: + advanced filters, price alerts
//! - **gold**: + cross-platform access, bulk export, custom reports
//! - **platinum** / **admin**: every limit unlimited, every feature on
//!
//! ## Components
//! - **standard**: the shipped capability records
//! - **table**: `TierTable`: immutable, process-wide lookup

pub mod standard;
pub mod table;

pub use table::{lookup_capability, TierTable};
