//! Error types for the flyweight store.

use thiserror::Error;

/// Result type for cache lookups.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur in cache operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Lookup for a key that was never inserted, with no fallback supplied.
    #[error("no {family} flyweight cached under key {key}")]
    NotFound { family: &'static str, key: String },
}
