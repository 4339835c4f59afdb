//! Synchronized queues for in-process communication.
//!
//! This module provides thread-safe queues for sharing work between threads
//! within the same process.

pub mod queue;
