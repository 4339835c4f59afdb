//! Core growable ring buffer algorithm.
//!
//! This module contains the unsynchronized circular buffer used by:
//! - [`crate::sync::queue`] - Mutex-guarded FIFO shared between threads

pub(crate) mod buffer;
