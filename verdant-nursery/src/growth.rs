//! Growth states: the linear `Seed → Vegetative → Mature → Dead` lifecycle.
//!
//! Each state is a shared, immutable flyweight. A state holds a handle to its
//! successor, so promoting a plant never needs a global lookup. Promotion
//! happens on the same `grow` call that crosses the threshold, and that call
//! applies the successor's deltas.

use crate::Plant;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use verdant_types::Stage;

/// Upper bound for plant health.
pub const MAX_HEALTH: u32 = 100;

/// Per-call adjustments and the promotion rule of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRules {
    pub hydration_delta: i32,
    pub light_delta: i32,
    pub health_delta: i32,
    /// Age at which the plant moves on to the next stage.
    pub promote_at_age: Option<u32>,
    /// Whether a plant with no health left moves on regardless of age.
    pub promote_when_depleted: bool,
}

impl StageRules {
    #[must_use]
    pub const fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Seed => Self {
                hydration_delta: -3,
                light_delta: 2,
                health_delta: 1,
                promote_at_age: Some(7),
                promote_when_depleted: false,
            },
            Stage::Vegetative => Self {
                hydration_delta: -31,
                light_delta: 20,
                health_delta: 2,
                promote_at_age: Some(30),
                promote_when_depleted: false,
            },
            Stage::Mature => Self {
                hydration_delta: -10,
                light_delta: 10,
                health_delta: 1,
                promote_at_age: Some(120),
                promote_when_depleted: true,
            },
            Stage::Dead => Self {
                hydration_delta: 0,
                light_delta: 0,
                health_delta: 0,
                promote_at_age: None,
                promote_when_depleted: false,
            },
        }
    }
}

/// A shared lifecycle stage.
pub struct GrowthState {
    stage: Stage,
    rules: StageRules,
    next: Option<Arc<GrowthState>>,
}

impl GrowthState {
    /// Builds the four linked stages, returned in lifecycle order.
    #[must_use]
    pub fn lifecycle() -> [Arc<GrowthState>; 4] {
        let dead = Arc::new(Self::new(Stage::Dead, None));
        let mature = Arc::new(Self::new(Stage::Mature, Some(Arc::clone(&dead))));
        let vegetative = Arc::new(Self::new(Stage::Vegetative, Some(Arc::clone(&mature))));
        let seed = Arc::new(Self::new(Stage::Seed, Some(Arc::clone(&vegetative))));
        [seed, vegetative, mature, dead]
    }

    fn new(stage: Stage, next: Option<Arc<GrowthState>>) -> Self {
        Self {
            stage,
            rules: StageRules::for_stage(stage),
            next,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn rules(&self) -> &StageRules {
        &self.rules
    }

    /// The shared instance of the following stage, `None` for `Dead`.
    #[must_use]
    pub fn successor(&self) -> Option<&Arc<GrowthState>> {
        self.next.as_ref()
    }

    /// Ages the plant by one day and applies this stage's rules.
    ///
    /// If the new age (or depleted health) triggers promotion, the plant is
    /// switched to the successor and the successor's rules are applied
    /// instead. Returns the stage the plant ends up in.
    pub fn grow(&self, plant: &mut Plant) -> Stage {
        plant.advance_age();

        match self.promotion(plant) {
            Some(next) => {
                debug!(
                    plant = %plant.id(),
                    from = %self.stage,
                    to = %next.stage,
                    age = plant.age(),
                    "stage promotion"
                );
                next.apply(plant);
                plant.set_growth_state(Arc::clone(next));
                next.stage
            }
            None => {
                self.apply(plant);
                self.stage
            }
        }
    }

    fn promotion(&self, plant: &Plant) -> Option<&Arc<GrowthState>> {
        let next = self.next.as_ref()?;
        let aged_out = self
            .rules
            .promote_at_age
            .is_some_and(|threshold| plant.age() >= threshold);
        let depleted = self.rules.promote_when_depleted && plant.health() == 0;
        (aged_out || depleted).then_some(next)
    }

    fn apply(&self, plant: &mut Plant) {
        if self.stage.is_terminal() {
            plant.pin_depleted();
        } else {
            plant.adjust_levels(
                self.rules.hydration_delta,
                self.rules.light_delta,
                self.rules.health_delta,
            );
        }
    }

    /// Plant name without spaces followed by the stage id, e.g. `RoseBush2`.
    #[must_use]
    pub fn display_key(&self, plant: &Plant) -> String {
        let mut key: String = plant.name().chars().filter(|c| *c != ' ').collect();
        key.push_str(&self.stage.id().to_string());
        key
    }

    /// `<base_dir>/<display key>.png`
    #[must_use]
    pub fn image_path(&self, plant: &Plant, base_dir: &str) -> String {
        format!(
            "{}/{}.png",
            base_dir.trim_end_matches('/'),
            self.display_key(plant)
        )
    }
}

impl fmt::Debug for GrowthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowthState")
            .field("stage", &self.stage)
            .field("rules", &self.rules)
            .field("next", &self.next.as_ref().map(|n| n.stage))
            .finish()
    }
}
