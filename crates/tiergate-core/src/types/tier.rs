//! Subscription tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TierError;

/// Subscription tier assigned to an account by the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Freemium,
    Basic,
    Gold,
    Platinum,
    Admin,
}

impl Tier {
    /// All 5 tiers, lowest capability first.
    pub const ALL: [Tier; 5] = [
        Self::Freemium,
        Self::Basic,
        Self::Gold,
        Self::Platinum,
        Self::Admin,
    ];

    /// Wire id, as stored on the account.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freemium => "freemium",
            Self::Basic => "basic",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Admin => "admin",
        }
    }

    /// Parse a tier from its wire id. Exact match only.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "freemium" => Some(Self::Freemium),
            "basic" => Some(Self::Basic),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Display name for upgrade prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Freemium => "Freemium",
            Self::Basic => "Basic",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Admin => "Admin",
        }
    }

    /// Capability rank. `Platinum` and `Admin` share the top rank: they carry
    /// identical quota records.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Freemium => 0,
            Self::Basic => 1,
            Self::Gold => 2,
            Self::Platinum | Self::Admin => 3,
        }
    }

    /// Whether this tier can be purchased. `Admin` is staff-only and never
    /// offered in upgrade prompts.
    pub fn is_purchasable(&self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TierError::UnknownTier {
            tier: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_roundtrip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::parse(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Tier::parse("Gold"), None);
        assert_eq!(Tier::parse(" gold"), None);
    }

    #[test]
    fn from_str_reports_unknown_tier() {
        let err = "enterprise".parse::<Tier>().unwrap_err();
        assert_eq!(
            err,
            TierError::UnknownTier {
                tier: "enterprise".to_string()
            }
        );
    }

    #[test]
    fn platinum_and_admin_share_rank() {
        assert_eq!(Tier::Platinum.rank(), Tier::Admin.rank());
        assert!(Tier::Gold.rank() < Tier::Platinum.rank());
    }
}
