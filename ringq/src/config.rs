//! Queue sizing configuration.
//!
//! A queue starts at `min_capacity` slots, doubles whenever it fills, and
//! (unless shrinking is disabled) halves again once it drops to a quarter
//! full. It never goes below `min_capacity`.
//!
//! # Tuning Guidelines
//!
//! - **Bursty producers**: raise `min_capacity` to the typical burst size so
//!   steady-state traffic never pays for a resize.
//! - **Latency-sensitive consumers**: use [`QueueConfig::grow_only`]. Pops
//!   never reallocate, at the cost of keeping peak memory.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default capacity floor.
pub const DEFAULT_MIN_CAPACITY: usize = 16;

/// Largest accepted capacity floor.
pub const MAX_MIN_CAPACITY: usize = 1 << 30;

/// Sizing policy for a [`crate::Queue`].
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Initial capacity and floor for shrinking.
    ///
    /// **Default**: 16
    pub min_capacity: usize,

    /// Whether pops may shrink the buffer once it is a quarter full.
    ///
    /// **Default**: true
    pub shrink: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_capacity: DEFAULT_MIN_CAPACITY,
            shrink: true,
        }
    }
}

impl QueueConfig {
    /// Creates a configuration whose buffer never shrinks.
    #[must_use]
    pub fn grow_only() -> Self {
        Self::default().with_shrink(false)
    }

    /// Sets the capacity floor.
    #[must_use]
    pub const fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    /// Enables or disables shrinking on pop.
    #[must_use]
    pub const fn with_shrink(mut self, shrink: bool) -> Self {
        self.shrink = shrink;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMinCapacity`] if `min_capacity == 0` and
    /// [`ConfigError::MinCapacityTooLarge`] if it exceeds
    /// [`MAX_MIN_CAPACITY`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_capacity == 0 {
            return Err(ConfigError::ZeroMinCapacity);
        }
        if self.min_capacity > MAX_MIN_CAPACITY {
            return Err(ConfigError::MinCapacityTooLarge {
                requested: self.min_capacity,
                max: MAX_MIN_CAPACITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = QueueConfig::default();

        assert_eq!(config.min_capacity, 16);
        assert!(config.shrink);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builder_pattern() {
        let config = QueueConfig::default()
            .with_min_capacity(256)
            .with_shrink(false);

        assert_eq!(config.min_capacity, 256);
        assert!(!config.shrink);
        assert_eq!(QueueConfig::grow_only().with_min_capacity(256), config);
    }

    #[test]
    fn zero_min_capacity_rejected() {
        let config = QueueConfig::default().with_min_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinCapacity));
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "min_capacity must be > 0"
        );
    }

    #[test]
    fn oversized_min_capacity_rejected() {
        let config = QueueConfig::default().with_min_capacity(MAX_MIN_CAPACITY + 1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinCapacityTooLarge {
                requested: MAX_MIN_CAPACITY + 1,
                max: MAX_MIN_CAPACITY,
            })
        );

        let config = QueueConfig::default().with_min_capacity(MAX_MIN_CAPACITY);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let config: QueueConfig = serde_json::from_str(r#"{"min_capacity": 64}"#).unwrap();
        assert_eq!(config, QueueConfig::default().with_min_capacity(64));

        let config: QueueConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, QueueConfig::default());

        let config: QueueConfig = serde_json::from_str(r#"{"shrink": false}"#).unwrap();
        assert_eq!(config, QueueConfig::grow_only());
    }

    #[test]
    fn serialize_round_trips_through_json() {
        let config = QueueConfig::default().with_min_capacity(32);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"min_capacity":32,"shrink":true}"#);
    }
}
