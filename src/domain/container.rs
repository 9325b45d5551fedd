//! Container identifiers.
//!
//! A container is either the single unranked Pool or one of the fixed, ordered
//! Tiers. Tier identity is a short label such as `"S"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(pub String);

impl TierId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TierId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifies one container of the partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    Pool,
    Tier(TierId),
}

impl ContainerId {
    /// Shorthand for `ContainerId::Tier(TierId::new(id))`.
    #[must_use]
    pub fn tier(id: impl Into<String>) -> Self {
        Self::Tier(TierId::new(id))
    }

    #[must_use]
    pub const fn is_pool(&self) -> bool {
        matches!(self, Self::Pool)
    }

    #[must_use]
    pub const fn as_tier(&self) -> Option<&TierId> {
        match self {
            Self::Tier(id) => Some(id),
            Self::Pool => None,
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool => f.write_str("pool"),
            Self::Tier(id) => write!(f, "tier:{id}"),
        }
    }
}
