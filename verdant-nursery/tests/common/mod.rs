//! Shared fixtures for nursery integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use verdant_nursery::strategy::for_tier;
use verdant_nursery::{CareEvent, CareObserver, GrowthState, Plant, PlantKind, Resource, Stage, Tier};

/// A Tree (hydration and light affect 5) with nothing assigned.
pub fn tree() -> Plant {
    Plant::new(Arc::from("Tree"), PlantKind::Tree.traits())
}

/// A Tree with low strategies and the given growth stage.
pub fn tree_in(stage: Stage) -> Plant {
    let mut plant = tree();
    plant
        .set_hydration_strategy(for_tier(Resource::Hydration, Tier::Low))
        .unwrap();
    plant
        .set_light_strategy(for_tier(Resource::Light, Tier::Low))
        .unwrap();
    plant.set_growth_state(state(stage));
    plant
}

/// A growth state from a freshly built lifecycle.
pub fn state(stage: Stage) -> Arc<GrowthState> {
    let lifecycle = GrowthState::lifecycle();
    Arc::clone(&lifecycle[stage.id() as usize])
}

/// Records every event it receives.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CareEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<CareEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl CareObserver for RecordingObserver {
    fn on_care_event(&self, event: &CareEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A recording observer and the trait-object handle groups attach.
pub fn recorder() -> (Arc<RecordingObserver>, Arc<dyn CareObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let handle: Arc<dyn CareObserver> = observer.clone();
    (observer, handle)
}
