//! Core type definitions for Verdant.
//!
//! This crate defines the small, dependency-light types shared by the
//! flyweight store and the nursery engine:
//! - Plant identifiers (UUID v7)
//! - Growth stages and care-strategy tiers with their stable numeric ids
//! - The care event delivered to observers of a plant group

mod event;
mod ids;
mod stage;
mod tier;

pub use event::{CareEvent, CareEventKind};
pub use ids::PlantId;
pub use stage::Stage;
pub use tier::{Resource, Tier};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid growth stage id: {0}")]
    InvalidStage(u32),

    #[error("invalid strategy tier id: {0}")]
    InvalidTier(u32),
}
