//! Nursery configuration.

use crate::{NurseryError, NurseryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default period between driver ticks (ms).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5_000;

/// Configuration for a [`Nursery`](crate::Nursery).
///
/// The tick interval is fixed for the lifetime of the nursery it was used to
/// build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NurseryConfig {
    /// Sleep between two driver ticks (ms).
    pub tick_interval_ms: u64,
    /// Base directory for stage images.
    pub image_dir: String,
    /// Name given to the driver thread.
    pub driver_thread_name: String,
}

impl Default for NurseryConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            image_dir: "images".to_string(),
            driver_thread_name: "verdant-driver".to_string(),
        }
    }
}

impl NurseryConfig {
    /// Returns the tick interval as a `Duration`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that the configuration can drive a nursery.
    pub fn validate(&self) -> NurseryResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(NurseryError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.driver_thread_name.is_empty() || self.driver_thread_name.contains('\0') {
            return Err(NurseryError::Config(
                "driver_thread_name must be a non-empty string without NUL bytes".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> NurseryResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> NurseryResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
