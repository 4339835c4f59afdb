//! Growable circular buffer with grow-on-full and shrink-on-drain resizing.
//!
//! # Layout
//!
//! Slots live in a `Vec<Option<T>>` treated as a ring. Element `i` of the
//! logical sequence is stored at `(head + i) % capacity`; `tail` is the next
//! free slot. Vacated slots are always `None`, so the buffer never keeps a
//! popped value alive.
//!
//! # Resizing
//!
//! - **Grow**: when `count == capacity` the next push first reallocates to
//!   `2 * count`.
//! - **Shrink**: after a pop, if `capacity > min_capacity` and
//!   `count * 4 <= capacity`, the buffer reallocates to
//!   `max(2 * count, min_capacity)`.
//!
//! Both directions linearize the live elements to the front of the new
//! buffer, so afterwards `head == 0` and `tail == count`.

use crate::config::QueueConfig;
use crate::trace::trace;

/// Circular buffer state without any synchronization.
///
/// Callers that share a buffer between threads must wrap it in a lock
/// (see [`crate::sync::queue::Queue`]).
pub(crate) struct RingBuffer<T> {
    /// Ring slots. `slots.len()` is the current capacity.
    slots: Vec<Option<T>>,

    /// Index of the oldest element.
    head: usize,

    /// Index of the next free slot.
    tail: usize,

    /// Number of live elements.
    count: usize,

    /// Capacity floor for shrinking and for freshly reset buffers.
    min_capacity: usize,

    /// Whether pops may shrink the buffer.
    shrink: bool,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer sized to `config.min_capacity`.
    ///
    /// The config must already be validated (`min_capacity > 0`).
    pub(crate) fn new(config: QueueConfig) -> Self {
        debug_assert!(config.min_capacity > 0, "min_capacity must be > 0");

        Self {
            slots: empty_slots(config.min_capacity),
            head: 0,
            tail: 0,
            count: 0,
            min_capacity: config.min_capacity,
            shrink: config.shrink,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Advances a slot index by one, wrapping to 0 at capacity.
    ///
    /// Equivalent to `(index + 1) % capacity` without the division.
    #[inline]
    fn bump(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }

    /// Appends `item` after the newest element, growing first if full.
    pub(crate) fn push_back(&mut self, item: T) {
        if self.count == self.slots.len() {
            self.resize(self.count * 2);
        }

        self.slots[self.tail] = Some(item);
        self.tail = self.bump(self.tail);
        self.count += 1;
    }

    /// Returns the oldest element, or `None` if empty.
    #[inline]
    pub(crate) fn front(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Removes and returns the oldest element, or `None` if empty.
    ///
    /// May shrink the buffer once it is at most a quarter full.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let item = self.slots[self.head].take();
        self.head = self.bump(self.head);
        self.count -= 1;

        let capacity = self.slots.len();
        if self.shrink && capacity > self.min_capacity && self.count * 4 <= capacity {
            self.resize((self.count * 2).max(self.min_capacity));
        }

        item
    }

    /// Removes every element, oldest first, and resets to minimum capacity.
    pub(crate) fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        self.move_live(|item| out.push(item));
        self.reset();
        out
    }

    /// Drops every element and resets to minimum capacity.
    pub(crate) fn clear(&mut self) {
        self.slots = empty_slots(self.min_capacity);
        self.reset();
    }

    fn reset(&mut self) {
        if self.slots.len() != self.min_capacity {
            self.slots = empty_slots(self.min_capacity);
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Reallocates to `new_capacity` slots, moving the live elements to the
    /// front in logical order.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity > self.count, "resize must leave a free slot");

        trace!(
            from = self.slots.len(),
            to = new_capacity,
            count = self.count,
            "ring resize"
        );

        let mut slots = Vec::with_capacity(new_capacity);
        self.move_live(|item| slots.push(Some(item)));
        slots.resize_with(new_capacity, || None);

        self.slots = slots;
        self.head = 0;
        self.tail = self.count;
    }

    /// Moves the live elements, oldest first, into `sink`, leaving their
    /// slots empty. Indices and `count` are left for the caller to fix up.
    ///
    /// The live range is contiguous when `tail > head`. Otherwise it wraps
    /// (this includes the full case `head == tail`) and is copied as
    /// `[head, capacity)` followed by `[0, tail)`.
    fn move_live(&mut self, mut sink: impl FnMut(T)) {
        if self.count == 0 {
            return;
        }

        let (first, second): (&mut [Option<T>], &mut [Option<T>]) = if self.tail > self.head {
            (&mut self.slots[self.head..self.tail], &mut [])
        } else {
            let (wrapped, upper) = self.slots.split_at_mut(self.head);
            (upper, &mut wrapped[..self.tail])
        };

        for slot in first.iter_mut().chain(second.iter_mut()) {
            if let Some(item) = slot.take() {
                sink(item);
            }
        }
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}
