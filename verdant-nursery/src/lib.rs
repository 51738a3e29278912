//! Plant nursery simulation engine for Verdant.
//!
//! # Architecture
//!
//! Plants live in a composite tree. A [`Group`] owns an ordered list of
//! plants and nested groups and fans every operation out to them, depth-first
//! and in insertion order. Both levels implement [`CareTarget`].
//!
//! Behaviour is shared, never copied. Each plant holds `Arc` handles to
//! flyweights taken from the [`Nursery`] caches:
//!
//! - a hydration and a light [`CareStrategy`] (low, mid, high or alternating)
//! - a [`GrowthState`] in the linear `Seed → Vegetative → Mature → Dead`
//!   lifecycle
//! - an interned name and, optionally, an interned season tag
//!
//! Only the metrics (age, health, hydration, light) belong to the plant.
//!
//! ## Components
//!
//! - **Strategies**: amount of water or light added per application
//! - **Growth states**: per-day deltas and promotion rules
//! - **Plants and groups**: the composite tree
//! - **Observers**: weakly registered on groups, one event per plant visited
//! - **Nursery**: process-wide owner of the root group, the caches and the
//!   background driver thread
//!
//! # Example
//!
//! ```
//! use verdant_nursery::{CareTarget, Nursery, PlantKind};
//!
//! let nursery = Nursery::instance();
//! let mut plant = nursery.new_plant(PlantKind::Tree);
//! nursery.assign_care(&mut plant, 1, 1, 0).unwrap();
//!
//! nursery.with_root(|root| {
//!     root.add_member(plant);
//!     root.water();
//!     root.tick();
//! });
//! ```

mod config;
mod error;
mod growth;
mod group;
mod modifiers;
mod nursery;
mod observer;
mod plant;
pub mod strategy;

pub use config::{NurseryConfig, DEFAULT_TICK_INTERVAL_MS};
pub use error::{NurseryError, NurseryResult};
pub use growth::{GrowthState, StageRules, MAX_HEALTH};
pub use group::{CareTarget, Group, Member, Plants};
pub use modifiers::{Attribute, AttributeChain, ModifierChain};
pub use nursery::{Collaborator, Nursery};
pub use observer::{CareObserver, ObserverList};
pub use plant::{BaseTraits, Plant, PlantKind};
pub use strategy::CareStrategy;

pub use verdant_types::{CareEvent, CareEventKind, PlantId, Resource, Stage, Tier};
