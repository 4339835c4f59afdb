//! Mutex-guarded growable FIFO queue for in-process (inter-thread) use.
//!
//! # Overview
//!
//! - [`Queue`] - Unbounded FIFO over a growable ring buffer
//! - Every operation takes one exclusive lock for its full duration,
//!   resizing included
//! - Amortized O(1) [`Queue::add`] and [`Queue::pop`]; an occasional call
//!   pays an O(n) resize while holding the lock
//!
//! # Example
//!
//! ```
//! use ringq::Queue;
//!
//! let queue = Queue::new();
//! queue.add("a");
//! queue.add("b");
//!
//! assert_eq!(queue.pop(), "a");
//! assert_eq!(queue.peek(), "b");
//! assert_eq!(queue.len(), 1);
//! ```
//!
//! # Empty access
//!
//! [`Queue::peek`] and [`Queue::pop`] panic on an empty queue: calling them
//! without checking [`Queue::len`] first is a bug in the caller. Use
//! [`Queue::try_peek`] / [`Queue::try_pop`] when emptiness is expected.
//!
//! The lock does not poison, so a queue stays usable after such a panic is
//! caught.

use std::fmt;

use parking_lot::Mutex;

use crate::config::QueueConfig;
use crate::error::ConfigError;
use crate::ring::buffer::RingBuffer;
use crate::trace::debug;

/// Panic message for [`Queue::peek`] and [`Queue::pop`] on an empty queue.
pub const EMPTY_QUEUE: &str = "ringq: empty queue";

/// Thread-safe FIFO queue backed by a growable ring buffer.
///
/// # Thread Safety
///
/// `Queue<T>` is [`Sync`] when `T: Send`. Share it with `Arc<Queue<T>>`;
/// operations from different threads are serialized by a single lock, in
/// lock-acquisition order.
pub struct Queue<T> {
    ring: Mutex<RingBuffer<T>>,
}

impl<T> Queue<T> {
    /// Creates an empty queue with the default configuration (16 slots).
    #[must_use]
    pub fn new() -> Self {
        Self::from_validated(QueueConfig::default())
    }

    /// Creates an empty queue with a custom sizing policy.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`QueueConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use ringq::{Queue, QueueConfig};
    ///
    /// let queue = Queue::<u64>::with_config(QueueConfig::grow_only().with_min_capacity(1024))?;
    /// assert_eq!(queue.capacity(), 1024);
    /// # Ok::<(), ringq::ConfigError>(())
    /// ```
    pub fn with_config(config: QueueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            min_capacity = config.min_capacity,
            shrink = config.shrink,
            "queue created"
        );
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: QueueConfig) -> Self {
        Self {
            ring: Mutex::new(RingBuffer::new(config)),
        }
    }

    /// Returns the number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.lock().len()
    }

    /// Returns `true` if the queue holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.lock().is_empty()
    }

    /// Returns the current number of slots in the ring buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.lock().capacity()
    }

    /// Appends `value` at the back of the queue.
    ///
    /// Doubles the buffer first if it is full.
    pub fn add(&self, value: T) {
        self.ring.lock().push_back(value);
    }

    /// Appends every element of `iter`, in order, under a single lock.
    pub fn add_all(&self, iter: impl IntoIterator<Item = T>) {
        let mut ring = self.ring.lock();
        for value in iter {
            ring.push_back(value);
        }
    }

    /// Returns a clone of the front element without removing it.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    #[must_use]
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.peek_with(T::clone)
    }

    /// Calls `f` with a reference to the front element while holding the lock.
    ///
    /// `f` must not call back into this queue; the lock is not reentrant.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let ring = self.ring.lock();
        match ring.front() {
            Some(front) => f(front),
            None => panic!("{EMPTY_QUEUE}"),
        }
    }

    /// Removes and returns the front element.
    ///
    /// Shrinks the buffer if it is left at most a quarter full.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn pop(&self) -> T {
        match self.ring.lock().pop_front() {
            Some(value) => value,
            None => panic!("{EMPTY_QUEUE}"),
        }
    }

    /// Returns a clone of the front element, or `None` if the queue is empty.
    #[must_use]
    pub fn try_peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.ring.lock().front().cloned()
    }

    /// Removes and returns the front element, or `None` if the queue is empty.
    #[must_use]
    pub fn try_pop(&self) -> Option<T> {
        self.ring.lock().pop_front()
    }

    /// Removes every element, front first, and resets to minimum capacity.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        self.ring.lock().drain()
    }

    /// Drops every element and resets to minimum capacity.
    pub fn clear(&self) {
        self.ring.lock().clear();
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring.lock();
        f.debug_struct("Queue")
            .field("len", &ring.len())
            .field("capacity", &ring.capacity())
            .finish()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let ring = self.ring.get_mut();
        for value in iter {
            ring.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
