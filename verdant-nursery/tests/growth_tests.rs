//! Tests for the growth-state lifecycle.

mod common;

use common::{state, tree, tree_in};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use verdant_nursery::{GrowthState, Plant, PlantKind, Stage, StageRules, MAX_HEALTH};

fn levels(plant: &Plant) -> (u32, u32, u32, u32) {
    (plant.age(), plant.hydration(), plant.light(), plant.health())
}

fn prepared(stage: Stage, age: u32, hydration: u32, light: u32, health: u32) -> Plant {
    let mut plant = tree_in(stage);
    plant.set_age(age);
    plant.set_hydration(hydration);
    plant.set_light(light);
    plant.set_health(health);
    plant
}

// ── Transitions ─────────────────────────────────────────────────

#[test]
fn seed_promotes_on_the_call_that_reaches_day_seven() {
    let mut plant = prepared(Stage::Seed, 6, 56, 30, 50);

    assert_eq!(plant.grow(), Some(Stage::Vegetative));
    assert_eq!(plant.stage(), Some(Stage::Vegetative));
    assert_eq!(levels(&plant), (7, 25, 50, 52));
}

#[test]
fn vegetative_promotes_to_mature_at_thirty() {
    let mut plant = prepared(Stage::Vegetative, 29, 50, 50, 60);

    assert_eq!(plant.grow(), Some(Stage::Mature));
    assert_eq!(levels(&plant), (30, 40, 60, 61));
}

#[test]
fn mature_dies_at_one_hundred_twenty() {
    let mut plant = prepared(Stage::Mature, 119, 80, 80, 10);

    assert_eq!(plant.grow(), Some(Stage::Dead));
    assert_eq!(levels(&plant), (120, 0, 0, 0));
}

#[test]
fn mature_dies_when_health_is_gone() {
    let mut plant = prepared(Stage::Mature, 45, 80, 80, 0);

    assert_eq!(plant.grow(), Some(Stage::Dead));
    assert_eq!(levels(&plant), (46, 0, 0, 0));
}

#[test]
fn dead_keeps_ageing_and_stays_empty() {
    let mut plant = prepared(Stage::Dead, 120, 0, 0, 0);

    assert_eq!(plant.grow(), Some(Stage::Dead));
    assert_eq!(levels(&plant), (121, 0, 0, 0));
}

#[test]
fn dead_pins_levels_even_after_watering() {
    let mut plant = prepared(Stage::Dead, 130, 0, 0, 0);
    plant.apply_hydration();
    plant.apply_light();
    assert!(plant.hydration() > 0);

    plant.grow();
    assert_eq!(levels(&plant), (131, 0, 0, 0));
}

// ── Per-stage deltas ────────────────────────────────────────────

#[test]
fn seed_deltas_without_promotion() {
    let mut plant = prepared(Stage::Seed, 0, 10, 0, 0);

    assert_eq!(plant.grow(), Some(Stage::Seed));
    assert_eq!(levels(&plant), (1, 7, 2, 1));
}

#[test]
fn hydration_saturates_at_zero() {
    let mut plant = prepared(Stage::Vegetative, 10, 5, 0, 20);
    plant.grow();
    assert_eq!(plant.hydration(), 0);
}

#[test]
fn health_is_capped() {
    let mut plant = prepared(Stage::Vegetative, 10, 100, 0, 99);
    plant.grow();
    assert_eq!(plant.health(), MAX_HEALTH);
}

#[test]
fn rules_table() {
    let seed = StageRules::for_stage(Stage::Seed);
    assert_eq!((seed.hydration_delta, seed.light_delta, seed.health_delta), (-3, 2, 1));
    assert_eq!(seed.promote_at_age, Some(7));

    let mature = StageRules::for_stage(Stage::Mature);
    assert_eq!(mature.promote_at_age, Some(120));
    assert!(mature.promote_when_depleted);

    assert_eq!(StageRules::for_stage(Stage::Dead).promote_at_age, None);
}

// ── Lifecycle ───────────────────────────────────────────────────

#[test]
fn lifecycle_links_each_stage_to_its_successor() {
    let [seed, vegetative, mature, dead] = GrowthState::lifecycle();

    assert!(Arc::ptr_eq(seed.successor().unwrap(), &vegetative));
    assert!(Arc::ptr_eq(vegetative.successor().unwrap(), &mature));
    assert!(Arc::ptr_eq(mature.successor().unwrap(), &dead));
    assert!(dead.successor().is_none());
}

#[test]
fn promotion_switches_to_the_shared_successor() {
    let seed = state(Stage::Seed);
    let mut plant = tree();
    plant.set_growth_state(Arc::clone(&seed));
    plant.set_age(6);

    plant.grow();
    assert!(Arc::ptr_eq(
        plant.growth_state().unwrap(),
        seed.successor().unwrap()
    ));
}

#[test]
fn a_full_life_walks_every_stage_once() {
    let mut plant = prepared(Stage::Seed, 0, 100, 0, 50);
    let mut seen = vec![Stage::Seed];

    for _ in 0..125 {
        let stage = plant.grow().unwrap();
        if seen.last() != Some(&stage) {
            seen.push(stage);
        }
    }

    assert_eq!(seen, Stage::ALL.to_vec());
    assert_eq!(plant.age(), 125);
}

#[test]
fn grow_without_a_state_does_nothing() {
    let mut plant = tree();
    assert_eq!(plant.grow(), None);
    assert_eq!(plant.age(), 0);
}

// ── Display ─────────────────────────────────────────────────────

#[test]
fn display_key_strips_spaces_and_appends_stage_id() {
    let plant = Plant::new(Arc::from("Rose Bush"), PlantKind::Shrub.named_traits());
    let mature = state(Stage::Mature);

    assert_eq!(mature.display_key(&plant), "RoseBush2");
    assert_eq!(state(Stage::Seed).display_key(&plant), "RoseBush0");
}

#[test]
fn image_path_joins_base_dir() {
    let plant = Plant::new(Arc::from("Rose Bush"), PlantKind::Shrub.named_traits());
    let dead = state(Stage::Dead);

    assert_eq!(dead.image_path(&plant, "images"), "images/RoseBush3.png");
    assert_eq!(dead.image_path(&plant, "assets/img/"), "assets/img/RoseBush3.png");
}
