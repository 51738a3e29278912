//! Care strategies: how much water or light a plant receives per application.
//!
//! Strategies are shared flyweights. The fixed tiers are pure functions of the
//! plant's base affect value; the alternating tier keeps a toggle inside the
//! strategy instance, so every plant sharing it sees the alternation.

use crate::Plant;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use verdant_types::{Resource, Tier};

/// Computes the amount of a resource to add to a plant.
pub trait CareStrategy: Send + Sync + fmt::Debug {
    /// The resource this strategy supplies.
    fn resource(&self) -> Resource;

    /// The magnitude tier of this strategy.
    fn tier(&self) -> Tier;

    /// Amount to add to the plant's level for [`resource`](Self::resource).
    fn amount(&self, plant: &Plant) -> u32;
}

/// `base + per_affect * affect`, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magnitude {
    pub base: u32,
    pub per_affect: u32,
    pub cap: Option<u32>,
}

impl Magnitude {
    #[must_use]
    pub const fn new(base: u32, per_affect: u32) -> Self {
        Self {
            base,
            per_affect,
            cap: None,
        }
    }

    #[must_use]
    pub const fn capped(base: u32, per_affect: u32, cap: u32) -> Self {
        Self {
            base,
            per_affect,
            cap: Some(cap),
        }
    }

    /// Evaluates the magnitude for a plant's affect value.
    #[must_use]
    pub fn eval(self, affect: u32) -> u32 {
        let raw = self
            .base
            .saturating_add(self.per_affect.saturating_mul(affect));
        self.cap.map_or(raw, |cap| raw.min(cap))
    }
}

/// A strategy that always applies the same magnitude.
#[derive(Debug)]
pub struct FixedTier {
    resource: Resource,
    tier: Tier,
    magnitude: Magnitude,
}

impl FixedTier {
    #[must_use]
    pub const fn new(resource: Resource, tier: Tier, magnitude: Magnitude) -> Self {
        Self {
            resource,
            tier,
            magnitude,
        }
    }
}

impl CareStrategy for FixedTier {
    fn resource(&self) -> Resource {
        self.resource
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn amount(&self, plant: &Plant) -> u32 {
        self.magnitude.eval(plant.traits().affect(self.resource))
    }
}

/// A strategy that switches between two disjoint bands on every call.
///
/// The bands never overlap, so two consecutive calls always return different
/// amounts.
#[derive(Debug)]
pub struct Alternating {
    resource: Resource,
    phases: [Magnitude; 2],
    flipped: AtomicBool,
}

impl Alternating {
    #[must_use]
    pub const fn new(resource: Resource, first: Magnitude, second: Magnitude) -> Self {
        Self {
            resource,
            phases: [first, second],
            flipped: AtomicBool::new(false),
        }
    }
}

impl CareStrategy for Alternating {
    fn resource(&self) -> Resource {
        self.resource
    }

    fn tier(&self) -> Tier {
        Tier::Alternating
    }

    fn amount(&self, plant: &Plant) -> u32 {
        let phase = usize::from(self.flipped.fetch_xor(true, Ordering::AcqRel));
        self.phases[phase].eval(plant.traits().affect(self.resource))
    }
}

/// Builds the standard strategy for a resource and tier.
///
/// | Resource  | Low      | Mid      | High     | Alternating                       |
/// |-----------|----------|----------|----------|-----------------------------------|
/// | Hydration | 25 + 2a  | 25 + 4a  | 25 + 8a  | min(2 + a, 24) / min(26 + 4a, 50) |
/// | Light     | 2 + 2a   | 20 + 4a  | 32 + 8a  | min(6 + 2a, 16) / min(16 + 4a, 36)|
#[must_use]
pub fn for_tier(resource: Resource, tier: Tier) -> Arc<dyn CareStrategy> {
    match (resource, tier) {
        (Resource::Hydration, Tier::Low) => fixed(resource, tier, Magnitude::new(25, 2)),
        (Resource::Hydration, Tier::Mid) => fixed(resource, tier, Magnitude::new(25, 4)),
        (Resource::Hydration, Tier::High) => fixed(resource, tier, Magnitude::new(25, 8)),
        (Resource::Hydration, Tier::Alternating) => Arc::new(Alternating::new(
            resource,
            Magnitude::capped(2, 1, 24),
            Magnitude::capped(26, 4, 50),
        )),
        (Resource::Light, Tier::Low) => fixed(resource, tier, Magnitude::new(2, 2)),
        (Resource::Light, Tier::Mid) => fixed(resource, tier, Magnitude::new(20, 4)),
        (Resource::Light, Tier::High) => fixed(resource, tier, Magnitude::new(32, 8)),
        (Resource::Light, Tier::Alternating) => Arc::new(Alternating::new(
            resource,
            Magnitude::capped(6, 2, 16),
            Magnitude::capped(16, 4, 36),
        )),
    }
}

fn fixed(resource: Resource, tier: Tier, magnitude: Magnitude) -> Arc<dyn CareStrategy> {
    Arc::new(FixedTier::new(resource, tier, magnitude))
}
