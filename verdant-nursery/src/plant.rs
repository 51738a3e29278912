//! Individual plants, the leaves of the nursery tree.

use crate::growth::MAX_HEALTH;
use crate::modifiers::ModifierChain;
use crate::{CareStrategy, GrowthState, NurseryError, NurseryResult};
use std::fmt;
use std::sync::Arc;
use verdant_types::{CareEvent, CareEventKind, PlantId, Resource, Stage};

/// Price and per-update resource use a plant is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseTraits {
    pub price: f64,
    pub hydration_affect: u32,
    pub light_affect: u32,
}

impl BaseTraits {
    #[must_use]
    pub const fn new(price: f64, hydration_affect: u32, light_affect: u32) -> Self {
        Self {
            price,
            hydration_affect,
            light_affect,
        }
    }

    /// Base affect value for a resource.
    #[must_use]
    pub const fn affect(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Hydration => self.hydration_affect,
            Resource::Light => self.light_affect,
        }
    }
}

/// The stock plant kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantKind {
    Herb,
    Shrub,
    Succulent,
    Tree,
}

impl PlantKind {
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            PlantKind::Herb => "Herb",
            PlantKind::Shrub => "Shrub",
            PlantKind::Succulent => "Succulent",
            PlantKind::Tree => "Tree",
        }
    }

    /// Traits of an unnamed plant of this kind.
    #[must_use]
    pub const fn traits(self) -> BaseTraits {
        match self {
            PlantKind::Herb => BaseTraits::new(30.0, 3, 3),
            PlantKind::Shrub => BaseTraits::new(75.0, 4, 4),
            PlantKind::Succulent => BaseTraits::new(45.0, 1, 5),
            PlantKind::Tree => BaseTraits::new(150.0, 5, 5),
        }
    }

    /// Traits of a custom-named plant of this kind: the kind's price, moderate use.
    #[must_use]
    pub const fn named_traits(self) -> BaseTraits {
        BaseTraits::new(self.traits().price, 4, 4)
    }
}

/// A single simulated plant.
///
/// Name, season, strategies and growth state are shared flyweights; the
/// metrics (age, health, hydration, light) belong to this plant alone.
/// All levels are unsigned and saturate at zero.
#[derive(Debug)]
pub struct Plant {
    id: PlantId,
    name: Arc<str>,
    traits: BaseTraits,
    season: Option<Arc<str>>,
    age: u32,
    health: u32,
    hydration: u32,
    light: u32,
    hydration_strategy: Option<Arc<dyn CareStrategy>>,
    light_strategy: Option<Arc<dyn CareStrategy>>,
    state: Option<Arc<GrowthState>>,
    modifiers: Option<Box<dyn ModifierChain>>,
}

impl Plant {
    /// Creates a plant with zeroed metrics and nothing assigned.
    #[must_use]
    pub fn new(name: Arc<str>, traits: BaseTraits) -> Self {
        Self {
            id: PlantId::new(),
            name,
            traits,
            season: None,
            age: 0,
            health: 0,
            hydration: 0,
            light: 0,
            hydration_strategy: None,
            light_strategy: None,
            state: None,
            modifiers: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlantId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The interned name handle.
    #[must_use]
    pub fn name_handle(&self) -> &Arc<str> {
        &self.name
    }

    #[must_use]
    pub fn traits(&self) -> &BaseTraits {
        &self.traits
    }

    #[must_use]
    pub fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }

    pub fn set_season(&mut self, season: Option<Arc<str>>) {
        self.season = season;
    }

    /// Age in days.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Overwrites the age. For restoring saved plants and building fixtures;
    /// growth itself only ever moves age forward.
    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Sets health, clamped to [`MAX_HEALTH`].
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(MAX_HEALTH);
    }

    #[must_use]
    pub fn hydration(&self) -> u32 {
        self.hydration
    }

    pub fn set_hydration(&mut self, hydration: u32) {
        self.hydration = hydration;
    }

    #[must_use]
    pub fn light(&self) -> u32 {
        self.light
    }

    pub fn set_light(&mut self, light: u32) {
        self.light = light;
    }

    // ── Shared behaviour ─────────────────────────────────────────

    #[must_use]
    pub fn hydration_strategy(&self) -> Option<&Arc<dyn CareStrategy>> {
        self.hydration_strategy.as_ref()
    }

    /// Assigns the hydration strategy. Rejects strategies for another resource.
    pub fn set_hydration_strategy(&mut self, strategy: Arc<dyn CareStrategy>) -> NurseryResult<()> {
        check_resource(&strategy, Resource::Hydration)?;
        self.hydration_strategy = Some(strategy);
        Ok(())
    }

    #[must_use]
    pub fn light_strategy(&self) -> Option<&Arc<dyn CareStrategy>> {
        self.light_strategy.as_ref()
    }

    /// Assigns the light strategy. Rejects strategies for another resource.
    pub fn set_light_strategy(&mut self, strategy: Arc<dyn CareStrategy>) -> NurseryResult<()> {
        check_resource(&strategy, Resource::Light)?;
        self.light_strategy = Some(strategy);
        Ok(())
    }

    #[must_use]
    pub fn growth_state(&self) -> Option<&Arc<GrowthState>> {
        self.state.as_ref()
    }

    pub fn set_growth_state(&mut self, state: Arc<GrowthState>) {
        self.state = Some(state);
    }

    /// Current lifecycle stage, if a growth state is assigned.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        self.state.as_ref().map(|s| s.stage())
    }

    // ── Modifiers ────────────────────────────────────────────────

    #[must_use]
    pub fn modifiers(&self) -> Option<&dyn ModifierChain> {
        self.modifiers.as_deref()
    }

    pub fn set_modifiers(&mut self, chain: Box<dyn ModifierChain>) {
        self.modifiers = Some(chain);
    }

    pub fn clear_modifiers(&mut self) -> Option<Box<dyn ModifierChain>> {
        self.modifiers.take()
    }

    #[must_use]
    pub fn effective_price(&self) -> f64 {
        match &self.modifiers {
            Some(chain) => chain.effective_price(self.traits.price),
            None => self.traits.price,
        }
    }

    #[must_use]
    pub fn effective_hydration_affect(&self) -> u32 {
        match &self.modifiers {
            Some(chain) => chain.effective_hydration_affect(self.traits.hydration_affect),
            None => self.traits.hydration_affect,
        }
    }

    #[must_use]
    pub fn effective_light_affect(&self) -> u32 {
        match &self.modifiers {
            Some(chain) => chain.effective_light_affect(self.traits.light_affect),
            None => self.traits.light_affect,
        }
    }

    // ── Care ─────────────────────────────────────────────────────

    /// Adds the hydration strategy's amount. Returns the amount added,
    /// 0 when no strategy is assigned.
    pub fn apply_hydration(&mut self) -> u32 {
        let Some(strategy) = self.hydration_strategy.clone() else {
            return 0;
        };
        let amount = strategy.amount(self);
        self.hydration = self.hydration.saturating_add(amount);
        amount
    }

    /// Adds the light strategy's amount. Returns the amount added,
    /// 0 when no strategy is assigned.
    pub fn apply_light(&mut self) -> u32 {
        let Some(strategy) = self.light_strategy.clone() else {
            return 0;
        };
        let amount = strategy.amount(self);
        self.light = self.light.saturating_add(amount);
        amount
    }

    /// Passive decay by the effective affect values.
    pub fn decay(&mut self) {
        self.hydration = self.hydration.saturating_sub(self.effective_hydration_affect());
        self.light = self.light.saturating_sub(self.effective_light_affect());
    }

    /// Runs one day of the assigned growth state. Returns the resulting stage,
    /// `None` when no growth state is assigned.
    pub fn grow(&mut self) -> Option<Stage> {
        let state = self.state.clone()?;
        Some(state.grow(self))
    }

    pub(crate) fn advance_age(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    pub(crate) fn adjust_levels(&mut self, hydration: i32, light: i32, health: i32) {
        self.hydration = self.hydration.saturating_add_signed(hydration);
        self.light = self.light.saturating_add_signed(light);
        self.health = self.health.saturating_add_signed(health).min(MAX_HEALTH);
    }

    pub(crate) fn pin_depleted(&mut self) {
        self.hydration = 0;
        self.light = 0;
        self.health = 0;
    }

    // ── Reporting ────────────────────────────────────────────────

    /// Snapshot of this plant for observers.
    #[must_use]
    pub fn care_event(&self, kind: CareEventKind) -> CareEvent {
        CareEvent {
            kind,
            plant_id: self.id,
            name: self.name.to_string(),
            stage: self.stage(),
            age: self.age,
            health: self.health,
            hydration: self.hydration,
            light: self.light,
        }
    }

    /// Multi-line human-readable summary of the plant.
    #[must_use]
    pub fn info(&self) -> String {
        InfoReport(self).to_string()
    }
}

/// A copy shares name, season, strategies and growth state, gets its own
/// metrics and modifier chain, and a fresh id.
impl Clone for Plant {
    fn clone(&self) -> Self {
        Self {
            id: PlantId::new(),
            name: Arc::clone(&self.name),
            traits: self.traits,
            season: self.season.clone(),
            age: self.age,
            health: self.health,
            hydration: self.hydration,
            light: self.light,
            hydration_strategy: self.hydration_strategy.clone(),
            light_strategy: self.light_strategy.clone(),
            state: self.state.clone(),
            modifiers: self.modifiers.clone(),
        }
    }
}

fn check_resource(strategy: &Arc<dyn CareStrategy>, expected: Resource) -> NurseryResult<()> {
    if strategy.resource() == expected {
        Ok(())
    } else {
        Err(NurseryError::InvalidArgument(format!(
            "{} strategy cannot be assigned as the {expected} strategy",
            strategy.resource()
        )))
    }
}

const RULE: &str = "-------------------------------";

struct InfoReport<'a>(&'a Plant);

impl fmt::Display for InfoReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plant = self.0;
        writeln!(f, "{RULE}")?;
        writeln!(f, "| {:<15}{:<13}|", "Name:", plant.name())?;
        writeln!(f, "| {:<15}{:<13}|", "Health:", plant.health)?;
        writeln!(f, "| {:<15}{:<13}|", "Age:", format!("{} days", plant.age))?;
        writeln!(f, "| {:<15}{:<13}|", "Water Level:", plant.hydration)?;
        writeln!(f, "| {:<15}{:<13}|", "Sun Exposure:", plant.light)?;
        writeln!(f, "| {:<15}R{:<12.2}|", "Base Price:", plant.traits.price)?;
        writeln!(f, "{RULE}")?;

        if let Some(chain) = &plant.modifiers {
            writeln!(f)?;
            writeln!(f, "Total:")?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "| {:<20}R{:<7.2}|", "Total Price:", plant.effective_price())?;
            writeln!(f, "| {:<20}{:<8}|", "Water Affection:", plant.effective_hydration_affect())?;
            writeln!(f, "| {:<20}{:<8}|", "Sun Affection:", plant.effective_light_affect())?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "Attributes:")?;
            for label in chain.labels() {
                writeln!(f, "  - {label}")?;
            }
        }
        Ok(())
    }
}
