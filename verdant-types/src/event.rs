//! Care events delivered to group observers.
//!
//! A group emits one event per plant affected by a watering, light exposure
//! or state check, after the effect has been applied. Events carry a
//! snapshot of the plant's metrics so observers never need to reach back
//! into the tree.

use crate::{PlantId, Stage};
use serde::{Deserialize, Serialize};

/// What happened to the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareEventKind {
    /// The plant's hydration strategy was applied.
    Watered,
    /// The plant's light strategy was applied.
    LightExposed,
    /// The plant's condition was inspected.
    StateChecked,
}

/// Snapshot of a plant right after a care operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareEvent {
    pub kind: CareEventKind,
    pub plant_id: PlantId,
    pub name: String,
    /// `None` when the plant has no growth state assigned.
    pub stage: Option<Stage>,
    pub age: u32,
    pub health: u32,
    pub hydration: u32,
    pub light: u32,
}
