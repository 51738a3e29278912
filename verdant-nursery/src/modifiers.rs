//! Modifier chains attached to plants.
//!
//! Cosmetic attributes (pots, charms, seasonal features) adjust a plant's
//! price and how fast it uses water and light. The nursery only consumes the
//! effective values; the attribute catalogue itself lives with the caller.

use std::fmt;
use std::sync::Arc;

/// A chain of modifiers consulted instead of a plant's base values.
pub trait ModifierChain: Send + Sync + fmt::Debug {
    /// Total price given the plant's base price.
    fn effective_price(&self, base: f64) -> f64;

    /// Hydration used per update given the plant's base affect.
    fn effective_hydration_affect(&self, base: u32) -> u32;

    /// Light used per update given the plant's base affect.
    fn effective_light_affect(&self, base: u32) -> u32;

    /// Labels shown in the plant's info report.
    fn labels(&self) -> Vec<String> {
        Vec::new()
    }

    /// Clones the chain into a new box. Plant clones get independent chains.
    fn box_clone(&self) -> Box<dyn ModifierChain>;
}

impl Clone for Box<dyn ModifierChain> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// One modifier: a named price and affect adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: Arc<str>,
    pub price: f64,
    pub hydration_affect: i32,
    pub light_affect: i32,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, price: f64, hydration_affect: i32, light_affect: i32) -> Self {
        Self {
            name: name.into(),
            price,
            hydration_affect,
            light_affect,
        }
    }
}

/// Ordered list of attributes whose adjustments add up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeChain {
    attributes: Vec<Attribute>,
}

impl AttributeChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute, builder style.
    #[must_use]
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn adjusted(base: u32, delta: i64) -> u32 {
        let total = i64::from(base) + delta;
        u32::try_from(total.max(0)).unwrap_or(u32::MAX)
    }
}

impl ModifierChain for AttributeChain {
    fn effective_price(&self, base: f64) -> f64 {
        base + self.attributes.iter().map(|a| a.price).sum::<f64>()
    }

    fn effective_hydration_affect(&self, base: u32) -> u32 {
        let delta: i64 = self.attributes.iter().map(|a| i64::from(a.hydration_affect)).sum();
        Self::adjusted(base, delta)
    }

    fn effective_light_affect(&self, base: u32) -> u32 {
        let delta: i64 = self.attributes.iter().map(|a| i64::from(a.light_affect)).sum();
        Self::adjusted(base, delta)
    }

    fn labels(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.to_string()).collect()
    }

    fn box_clone(&self) -> Box<dyn ModifierChain> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> AttributeChain {
        AttributeChain::new()
            .with(Attribute::new("Large Pot", 20.0, -2, 0))
            .with(Attribute::new("Autumn", 5.5, 1, -1))
    }

    #[test]
    fn adjustments_add_up() {
        let chain = chain();
        assert!((chain.effective_price(150.0) - 175.5).abs() < f64::EPSILON);
        assert_eq!(chain.effective_hydration_affect(5), 4);
        assert_eq!(chain.effective_light_affect(5), 4);
    }

    #[test]
    fn affects_never_go_negative() {
        let chain = AttributeChain::new().with(Attribute::new("Greenhouse", 0.0, -50, -50));
        assert_eq!(chain.effective_hydration_affect(3), 0);
        assert_eq!(chain.effective_light_affect(3), 0);
    }

    #[test]
    fn labels_keep_order() {
        assert_eq!(chain().labels(), vec!["Large Pot", "Autumn"]);
    }

    #[test]
    fn boxed_clone_is_independent() {
        let original: Box<dyn ModifierChain> = Box::new(chain());
        let copy = original.clone();
        assert_eq!(copy.labels(), original.labels());
    }
}
