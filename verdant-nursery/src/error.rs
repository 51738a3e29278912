//! Error types for the nursery engine.

use thiserror::Error;
use verdant_flyweight::CacheError;

/// Result type for nursery operations.
pub type NurseryResult<T> = Result<T, NurseryError>;

/// Errors that can occur in nursery operations.
///
/// Cache misses never escape the [`Nursery`](crate::Nursery) lookups; they are
/// logged and replaced by the default tier or stage.
#[derive(Debug, Error)]
pub enum NurseryError {
    /// Flyweight lookup miss.
    #[error(transparent)]
    NotFound(#[from] CacheError),

    /// Unknown stage or tier id.
    #[error(transparent)]
    InvalidId(#[from] verdant_types::Error),

    /// A value was rejected and nothing was changed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error (reading configuration).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The background driver could not be started.
    #[error("driver error: {0}")]
    Driver(String),
}
