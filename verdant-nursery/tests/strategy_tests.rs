//! Tests for care strategies applied through plants.

mod common;

use common::tree;
use proptest::prelude::*;
use std::sync::Arc;
use verdant_nursery::strategy::{for_tier, Alternating, FixedTier, Magnitude};
use verdant_nursery::{BaseTraits, CareStrategy, NurseryError, Plant, Resource, Tier};

fn hydrated(tier: Tier) -> u32 {
    let mut plant = tree();
    plant
        .set_hydration_strategy(for_tier(Resource::Hydration, tier))
        .unwrap();
    plant.apply_hydration();
    plant.hydration()
}

fn lit(tier: Tier) -> u32 {
    let mut plant = tree();
    plant.set_light_strategy(for_tier(Resource::Light, tier)).unwrap();
    plant.apply_light();
    plant.light()
}

// ── Fixed tiers ─────────────────────────────────────────────────

#[test]
fn hydration_tiers_on_a_tree() {
    assert_eq!(hydrated(Tier::Low), 35);
    assert_eq!(hydrated(Tier::Mid), 45);
    assert_eq!(hydrated(Tier::High), 65);
}

#[test]
fn light_tiers_on_a_tree() {
    assert_eq!(lit(Tier::Low), 12);
    assert_eq!(lit(Tier::Mid), 40);
    assert_eq!(lit(Tier::High), 72);
}

#[test]
fn fixed_tier_adds_on_top_of_the_current_level() {
    let mut plant = tree();
    plant.set_hydration(10);
    plant
        .set_hydration_strategy(for_tier(Resource::Hydration, Tier::Low))
        .unwrap();

    assert_eq!(plant.apply_hydration(), 35);
    assert_eq!(plant.hydration(), 45);
}

#[test]
fn no_strategy_is_a_no_op() {
    let mut plant = tree();
    assert_eq!(plant.apply_hydration(), 0);
    assert_eq!(plant.apply_light(), 0);
    assert_eq!(plant.hydration(), 0);
    assert_eq!(plant.light(), 0);
}

// ── Alternating ─────────────────────────────────────────────────

#[test]
fn alternating_hydration_differs_between_consecutive_calls() {
    let strategy = for_tier(Resource::Hydration, Tier::Alternating);
    let plant = tree();

    let first = strategy.amount(&plant);
    let second = strategy.amount(&plant);

    assert_ne!(first, second);
    for amount in [first, second] {
        assert!((2..=50).contains(&amount), "{amount} outside [2, 50]");
    }
}

#[test]
fn alternating_light_switches_between_16_and_36() {
    let strategy = for_tier(Resource::Light, Tier::Alternating);
    let plant = tree();

    let amounts: Vec<u32> = (0..4).map(|_| strategy.amount(&plant)).collect();
    assert_eq!(amounts, vec![16, 36, 16, 36]);
}

#[test]
fn alternation_is_shared_by_every_plant_using_the_strategy() {
    let strategy = for_tier(Resource::Hydration, Tier::Alternating);
    let mut a = tree();
    let mut b = tree();
    a.set_hydration_strategy(Arc::clone(&strategy)).unwrap();
    b.set_hydration_strategy(strategy).unwrap();

    let first = a.apply_hydration();
    let second = b.apply_hydration();
    assert_ne!(first, second);
}

// ── Assignment ──────────────────────────────────────────────────

#[test]
fn mismatched_resource_is_rejected_and_plant_unchanged() {
    let mut plant = tree();
    let result = plant.set_hydration_strategy(for_tier(Resource::Light, Tier::High));

    assert!(matches!(result, Err(NurseryError::InvalidArgument(_))));
    assert!(plant.hydration_strategy().is_none());

    let result = plant.set_light_strategy(for_tier(Resource::Hydration, Tier::Low));
    assert!(matches!(result, Err(NurseryError::InvalidArgument(_))));
    assert!(plant.light_strategy().is_none());
}

#[test]
fn custom_strategies_plug_in() {
    let strategy: Arc<dyn CareStrategy> = Arc::new(FixedTier::new(
        Resource::Light,
        Tier::Mid,
        Magnitude::capped(1, 10, 25),
    ));
    let mut plant = tree();
    plant.set_light_strategy(strategy).unwrap();

    assert_eq!(plant.apply_light(), 25);
    assert_eq!(plant.light_strategy().unwrap().tier(), Tier::Mid);
}

proptest! {
    #[test]
    fn alternating_always_alternates(affect in 0u32..500, calls in 2usize..12) {
        let plant = Plant::new(Arc::from("Fern"), BaseTraits::new(10.0, affect, affect));
        for resource in [Resource::Hydration, Resource::Light] {
            let strategy = for_tier(resource, Tier::Alternating);
            let amounts: Vec<u32> = (0..calls).map(|_| strategy.amount(&plant)).collect();
            for pair in amounts.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn alternating_stays_in_its_bands(affect in 0u32..500) {
        let plant = Plant::new(Arc::from("Fern"), BaseTraits::new(10.0, affect, affect));
        let strategy = Alternating::new(
            Resource::Hydration,
            Magnitude::capped(2, 1, 24),
            Magnitude::capped(26, 4, 50),
        );
        let a = strategy.amount(&plant);
        let b = strategy.amount(&plant);
        prop_assert!((2..=24).contains(&a));
        prop_assert!((26..=50).contains(&b));
    }
}
