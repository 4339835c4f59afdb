//! Error types.

use thiserror::Error;

/// Error returned when a [`crate::QueueConfig`] fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The capacity floor must hold at least one slot.
    #[error("min_capacity must be > 0")]
    ZeroMinCapacity,
    /// The capacity floor exceeds [`crate::config::MAX_MIN_CAPACITY`].
    #[error("min_capacity {requested} exceeds maximum {max}")]
    MinCapacityTooLarge {
        /// Requested floor.
        requested: usize,
        /// Largest accepted floor.
        max: usize,
    },
}
