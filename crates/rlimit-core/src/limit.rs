//! Limit values and soft/hard pairs

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A single limit value.
///
/// `Unbounded` orders above every finite value, so `soft <= hard` checks read
/// naturally with the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum Limit {
    Finite(u64),
    Unbounded,
}

impl Limit {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }

    /// Finite value, or `None` when unbounded
    pub fn as_finite(&self) -> Option<u64> {
        match self {
            Limit::Finite(value) => Some(*value),
            Limit::Unbounded => None,
        }
    }
}

impl From<u64> for Limit {
    fn from(value: u64) -> Self {
        Limit::Finite(value)
    }
}

impl From<Option<u64>> for Limit {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Limit::Unbounded, Limit::Finite)
    }
}

impl From<Limit> for Option<u64> {
    fn from(limit: Limit) -> Self {
        limit.as_finite()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Finite(value) => write!(f, "{}", value),
            Limit::Unbounded => f.write_str("unlimited"),
        }
    }
}

/// Soft and hard limit for one category.
///
/// Either a snapshot read from the kernel or a request to apply. It carries no
/// identity and is never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimitPair {
    /// Currently enforced ceiling
    pub soft: Limit,
    /// Ceiling for `soft`; raising it usually needs privilege
    pub hard: Limit,
}

impl LimitPair {
    pub fn new(soft: Limit, hard: Limit) -> Self {
        Self { soft, hard }
    }

    pub fn finite(soft: u64, hard: u64) -> Self {
        Self::new(Limit::Finite(soft), Limit::Finite(hard))
    }

    pub fn unbounded() -> Self {
        Self::new(Limit::Unbounded, Limit::Unbounded)
    }

    /// `soft <= hard`, treating unbounded as larger than any finite value.
    ///
    /// A finite soft under an unbounded hard is ordered; the reverse is not.
    pub fn is_ordered(&self) -> bool {
        self.soft <= self.hard
    }
}

impl fmt::Display for LimitPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "soft={}, hard={}", self.soft, self.hard)
    }
}

/// A possibly partial change to a limit pair.
///
/// A side left as `None` keeps whatever is in effect when the request is
/// applied. In JSON an absent key means "keep" and `null` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitRequest {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub soft: Option<Limit>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub hard: Option<Limit>,
}

impl LimitRequest {
    pub fn soft(limit: impl Into<Limit>) -> Self {
        Self {
            soft: Some(limit.into()),
            hard: None,
        }
    }

    pub fn hard(limit: impl Into<Limit>) -> Self {
        Self {
            soft: None,
            hard: Some(limit.into()),
        }
    }

    /// Both sides given, so applying needs no prior read
    pub fn as_pair(&self) -> Option<LimitPair> {
        match (self.soft, self.hard) {
            (Some(soft), Some(hard)) => Some(LimitPair::new(soft, hard)),
            _ => None,
        }
    }

    /// Fill omitted sides from `current`
    pub fn resolve(&self, current: LimitPair) -> LimitPair {
        LimitPair::new(
            self.soft.unwrap_or(current.soft),
            self.hard.unwrap_or(current.hard),
        )
    }
}

impl From<LimitPair> for LimitRequest {
    fn from(pair: LimitPair) -> Self {
        Self {
            soft: Some(pair.soft),
            hard: Some(pair.hard),
        }
    }
}

// Distinguishes an explicit `null` (unbounded) from a missing key (keep).
fn present<'de, D>(deserializer: D) -> Result<Option<Limit>, D::Error>
where
    D: Deserializer<'de>,
{
    Limit::deserialize(deserializer).map(Some)
}
