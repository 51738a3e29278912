//! Care resources and the strategy tiers that supply them.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource a plant consumes and a care strategy supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Hydration,
    Light,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Hydration => f.write_str("hydration"),
            Resource::Light => f.write_str("light"),
        }
    }
}

/// Magnitude band of a care strategy.
///
/// Ids start at 1; `Low` is the documented fallback for unknown ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Mid,
    High,
    Alternating,
}

impl Tier {
    /// All tiers in id order.
    pub const ALL: [Tier; 4] = [Tier::Low, Tier::Mid, Tier::High, Tier::Alternating];

    /// Returns the stable numeric id of this tier.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Tier::Low => 1,
            Tier::Mid => 2,
            Tier::High => 3,
            Tier::Alternating => 4,
        }
    }
}

impl TryFrom<u32> for Tier {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Tier::Low),
            2 => Ok(Tier::Mid),
            3 => Ok(Tier::High),
            4 => Ok(Tier::Alternating),
            other => Err(Error::InvalidTier(other)),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Low => "low",
            Tier::Mid => "mid",
            Tier::High => "high",
            Tier::Alternating => "alternating",
        };
        f.write_str(name)
    }
}
