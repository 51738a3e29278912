//! Growth stages of a plant.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stage in the linear plant lifecycle.
///
/// Stages only ever move forward: `Seed → Vegetative → Mature → Dead`.
/// The numeric id doubles as the display-key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Seed,
    Vegetative,
    Mature,
    Dead,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Stage; 4] = [Stage::Seed, Stage::Vegetative, Stage::Mature, Stage::Dead];

    /// Returns the stable numeric id of this stage.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Stage::Seed => 0,
            Stage::Vegetative => 1,
            Stage::Mature => 2,
            Stage::Dead => 3,
        }
    }

    /// Returns the stage that follows this one, or `None` for `Dead`.
    #[must_use]
    pub const fn next(self) -> Option<Stage> {
        match self {
            Stage::Seed => Some(Stage::Vegetative),
            Stage::Vegetative => Some(Stage::Mature),
            Stage::Mature => Some(Stage::Dead),
            Stage::Dead => None,
        }
    }

    /// Returns true for the terminal stage.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Stage::Dead)
    }

    /// Human-readable stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Seed => "Seed",
            Stage::Vegetative => "Vegetative",
            Stage::Mature => "Mature",
            Stage::Dead => "Dead",
        }
    }
}

impl TryFrom<u32> for Stage {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Stage::Seed),
            1 => Ok(Stage::Vegetative),
            2 => Ok(Stage::Mature),
            3 => Ok(Stage::Dead),
            other => Err(Error::InvalidStage(other)),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
