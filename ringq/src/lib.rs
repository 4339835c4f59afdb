//! Thread-safe growable ring-buffer FIFO queue.
//!
//! [`Queue`] stores values in a circular buffer that doubles when full and
//! halves when a quarter full, never going below its configured minimum
//! (16 slots by default). A single mutex serializes every operation.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(ringq::Queue::new());
//!
//! let producer = Arc::clone(&queue);
//! thread::spawn(move || {
//!     for i in 0..100 {
//!         producer.add(i);
//!     }
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(queue.len(), 100);
//! assert_eq!(queue.pop(), 0);
//! ```

pub mod config;
pub mod error;
mod ring;
pub mod sync;
pub mod trace;

pub use config::QueueConfig;
pub use error::ConfigError;
pub use sync::queue::{EMPTY_QUEUE, Queue};
pub use trace::init_tracing;
