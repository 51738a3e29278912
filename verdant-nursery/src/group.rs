//! The composite tree: groups of plants and nested groups.
//!
//! [`CareTarget`] is the uniform contract shared by leaves and branches.
//! A group owns its members exclusively, so a group can never contain
//! itself and dropping a group drops its whole subtree. Every operation
//! visits members in insertion order, depth-first.

use crate::observer::{CareObserver, ObserverList};
use crate::Plant;
use std::slice;
use std::sync::Arc;
use verdant_types::{CareEvent, CareEventKind, PlantId};

/// Operations available on every node of the tree.
///
/// Each call returns the number of plants it visited.
pub trait CareTarget {
    /// Applies hydration strategies.
    fn water(&mut self) -> usize;

    /// Applies light strategies.
    fn expose_to_light(&mut self) -> usize;

    /// Inspects plant condition without changing it.
    fn check_state(&mut self) -> usize;

    /// Passive decay of hydration and light.
    fn update(&mut self) -> usize;

    /// Advances growth by one day.
    fn tick(&mut self) -> usize;
}

impl CareTarget for Plant {
    fn water(&mut self) -> usize {
        self.apply_hydration();
        1
    }

    fn expose_to_light(&mut self) -> usize {
        self.apply_light();
        1
    }

    fn check_state(&mut self) -> usize {
        1
    }

    fn update(&mut self) -> usize {
        self.decay();
        1
    }

    fn tick(&mut self) -> usize {
        self.grow();
        1
    }
}

/// A node of the tree.
#[derive(Debug, Clone)]
pub enum Member {
    Plant(Plant),
    Group(Group),
}

impl Member {
    #[must_use]
    pub fn as_plant(&self) -> Option<&Plant> {
        match self {
            Member::Plant(plant) => Some(plant),
            Member::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Member::Group(group) => Some(group),
            Member::Plant(_) => None,
        }
    }

    #[must_use]
    pub fn into_plant(self) -> Option<Plant> {
        match self {
            Member::Plant(plant) => Some(plant),
            Member::Group(_) => None,
        }
    }
}

impl From<Plant> for Member {
    fn from(plant: Plant) -> Self {
        Member::Plant(plant)
    }
}

impl From<Group> for Member {
    fn from(group: Group) -> Self {
        Member::Group(group)
    }
}

impl CareTarget for Member {
    fn water(&mut self) -> usize {
        match self {
            Member::Plant(plant) => plant.water(),
            Member::Group(group) => group.water(),
        }
    }

    fn expose_to_light(&mut self) -> usize {
        match self {
            Member::Plant(plant) => plant.expose_to_light(),
            Member::Group(group) => group.expose_to_light(),
        }
    }

    fn check_state(&mut self) -> usize {
        match self {
            Member::Plant(plant) => plant.check_state(),
            Member::Group(group) => group.check_state(),
        }
    }

    fn update(&mut self) -> usize {
        match self {
            Member::Plant(plant) => plant.update(),
            Member::Group(group) => group.update(),
        }
    }

    fn tick(&mut self) -> usize {
        match self {
            Member::Plant(plant) => plant.tick(),
            Member::Group(group) => group.tick(),
        }
    }
}

/// An ordered collection of plants and groups, and the subject its
/// observers watch.
///
/// Cloning a group deep-clones its members (each plant gets a fresh id) and
/// leaves the observer list behind.
#[derive(Debug, Default)]
pub struct Group {
    members: Vec<Member>,
    observers: ObserverList,
}

impl Clone for Group {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            observers: ObserverList::new(),
        }
    }
}

impl Group {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plant or group; the group takes ownership.
    pub fn add_member(&mut self, member: impl Into<Member>) {
        self.members.push(member.into());
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Direct members, not counting the contents of nested groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of plants in the whole subtree.
    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.plants().count()
    }

    /// Every plant in the subtree, depth-first.
    #[must_use]
    pub fn plants(&self) -> Plants<'_> {
        Plants {
            stack: vec![self.members.iter()],
        }
    }

    /// Plants tagged with `season`, depth-first.
    pub fn plants_in_season<'a>(&'a self, season: &'a str) -> impl Iterator<Item = &'a Plant> {
        self.plants().filter(move |plant| plant.season() == Some(season))
    }

    #[must_use]
    pub fn find(&self, id: PlantId) -> Option<&Plant> {
        self.plants().find(|plant| plant.id() == id)
    }

    pub fn find_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        for member in &mut self.members {
            match member {
                Member::Plant(plant) if plant.id() == id => return Some(plant),
                Member::Plant(_) => {}
                Member::Group(group) => {
                    if let Some(plant) = group.find_mut(id) {
                        return Some(plant);
                    }
                }
            }
        }
        None
    }

    /// Takes a plant out of whichever group in the subtree owns it.
    pub fn remove_plant(&mut self, id: PlantId) -> Option<Plant> {
        let position = self
            .members
            .iter()
            .position(|m| m.as_plant().is_some_and(|plant| plant.id() == id));
        if let Some(position) = position {
            return self.members.remove(position).into_plant();
        }

        self.members.iter_mut().find_map(|member| match member {
            Member::Group(group) => group.remove_plant(id),
            Member::Plant(_) => None,
        })
    }

    // ── Observers ────────────────────────────────────────────────

    /// Registers a weak handle. Attaching twice means two notifications
    /// per event.
    pub fn attach(&mut self, observer: &Arc<dyn CareObserver>) {
        self.observers.attach(observer);
    }

    /// Removes every registration of `observer`; returns how many there were.
    pub fn detach(&mut self, observer: &Arc<dyn CareObserver>) -> usize {
        self.observers.detach(observer)
    }

    /// Live observer registrations on this group (not its children).
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ── Traversal ────────────────────────────────────────────────

    fn care(&mut self, kind: CareEventKind, events: &mut Vec<CareEvent>) {
        let start = events.len();
        for member in &mut self.members {
            match member {
                Member::Plant(plant) => {
                    match kind {
                        CareEventKind::Watered => {
                            plant.apply_hydration();
                        }
                        CareEventKind::LightExposed => {
                            plant.apply_light();
                        }
                        CareEventKind::StateChecked => {}
                    }
                    events.push(plant.care_event(kind));
                }
                Member::Group(group) => group.care(kind, events),
            }
        }
        self.observers.notify(&events[start..]);
    }

    fn notify_care(&mut self, kind: CareEventKind) -> usize {
        let mut events = Vec::new();
        self.care(kind, &mut events);
        events.len()
    }

    fn for_each_plant_mut(&mut self, f: &mut impl FnMut(&mut Plant)) -> usize {
        let mut visited = 0;
        for member in &mut self.members {
            match member {
                Member::Plant(plant) => {
                    f(plant);
                    visited += 1;
                }
                Member::Group(group) => visited += group.for_each_plant_mut(f),
            }
        }
        visited
    }
}

impl CareTarget for Group {
    fn water(&mut self) -> usize {
        self.notify_care(CareEventKind::Watered)
    }

    fn expose_to_light(&mut self) -> usize {
        self.notify_care(CareEventKind::LightExposed)
    }

    fn check_state(&mut self) -> usize {
        self.notify_care(CareEventKind::StateChecked)
    }

    fn update(&mut self) -> usize {
        self.for_each_plant_mut(&mut Plant::decay)
    }

    fn tick(&mut self) -> usize {
        self.for_each_plant_mut(&mut |plant| {
            plant.grow();
        })
    }
}

/// Depth-first iterator over the plants of a group.
pub struct Plants<'a> {
    stack: Vec<slice::Iter<'a, Member>>,
}

impl<'a> Iterator for Plants<'a> {
    type Item = &'a Plant;

    fn next(&mut self) -> Option<&'a Plant> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Member::Plant(plant)) => return Some(plant),
                Some(Member::Group(group)) => self.stack.push(group.members.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
