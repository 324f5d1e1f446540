//! Numeric limits and remaining quota.
//!
//! `Limit` is a tagged value rather than an integer with a `-1` sentinel, so
//! an unlimited cap can never leak into a numeric comparison. `Quota` carries
//! no arithmetic operators for the same reason.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A per-period cap on one action category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Hard cap: at most `n` uses per period.
    Finite(u64),
    /// No cap. Counters are never consulted.
    Unlimited,
}

impl Limit {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// The numeric cap, or `None` when unlimited.
    pub fn finite(&self) -> Option<u64> {
        match self {
            Self::Finite(n) => Some(*n),
            Self::Unlimited => None,
        }
    }

    /// Closed comparison: the Nth use is allowed, the (N+1)th is not.
    pub fn permits(&self, used: u64) -> bool {
        match self {
            Self::Finite(max) => used < *max,
            Self::Unlimited => true,
        }
    }

    /// Remaining uses given `used`, clamped at zero.
    pub fn remaining(&self, used: u64) -> Quota {
        match self {
            Self::Finite(max) => Quota::Remaining(max.saturating_sub(used)),
            Self::Unlimited => Quota::Unlimited,
        }
    }

    /// Whether `self` grants at least as much as `other`.
    pub fn covers(&self, other: &Limit) -> bool {
        match (self, other) {
            (Self::Unlimited, _) => true,
            (Self::Finite(_), Self::Unlimited) => false,
            (Self::Finite(a), Self::Finite(b)) => a >= b,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

// Wire form: an integer, or the string "unlimited".
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Finite(u64),
    Named(String),
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(n) => LimitRepr::Finite(*n).serialize(serializer),
            Self::Unlimited => LimitRepr::Named("unlimited".to_string()).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match LimitRepr::deserialize(deserializer)? {
            LimitRepr::Finite(n) => Ok(Self::Finite(n)),
            LimitRepr::Named(s) if s == "unlimited" => Ok(Self::Unlimited),
            LimitRepr::Named(s) => Err(serde::de::Error::custom(format!(
                "expected a non-negative integer or \"unlimited\", got \"{s}\""
            ))),
        }
    }
}

/// Remaining quota for display and API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quota {
    Remaining(u64),
    Unlimited,
}

impl Quota {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Remaining count, or `None` when unlimited.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Remaining(n) => Some(*n),
            Self::Unlimited => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Remaining(0))
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_limit_is_inclusive_of_nth_use() {
        let limit = Limit::Finite(10);
        assert!(limit.permits(9));
        assert!(!limit.permits(10));
        assert!(!limit.permits(11));
    }

    #[test]
    fn zero_limit_permits_nothing() {
        assert!(!Limit::Finite(0).permits(0));
        assert_eq!(Limit::Finite(0).remaining(0), Quota::Remaining(0));
    }

    #[test]
    fn remaining_never_negative_on_overrun() {
        assert_eq!(Limit::Finite(5).remaining(7), Quota::Remaining(0));
    }

    #[test]
    fn unlimited_ignores_counter() {
        assert!(Limit::Unlimited.permits(u64::MAX));
        assert_eq!(Limit::Unlimited.remaining(u64::MAX), Quota::Unlimited);
    }

    #[test]
    fn serde_accepts_integer_and_unlimited() {
        let finite: Limit = serde_json::from_str("25").unwrap();
        assert_eq!(finite, Limit::Finite(25));
        let unlimited: Limit = serde_json::from_str("\"unlimited\"").unwrap();
        assert_eq!(unlimited, Limit::Unlimited);
        assert_eq!(serde_json::to_string(&Limit::Unlimited).unwrap(), "\"unlimited\"");
    }

    #[test]
    fn serde_rejects_negative_sentinel() {
        assert!(serde_json::from_str::<Limit>("-1").is_err());
        assert!(serde_json::from_str::<Limit>("\"infinite\"").is_err());
    }

    #[test]
    fn covers_orders_unlimited_above_finite() {
        assert!(Limit::Unlimited.covers(&Limit::Finite(u64::MAX)));
        assert!(!Limit::Finite(u64::MAX).covers(&Limit::Unlimited));
        assert!(Limit::Finite(10).covers(&Limit::Finite(10)));
    }
}
