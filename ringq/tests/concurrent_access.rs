//! Multi-threaded tests for `ringq::Queue`.
//!
//! # Running with tracing
//!
//! To watch resize events while these run:
//! ```bash
//! RINGQ_LOG=ringq=trace cargo test --features tracing --test concurrent_access -- --nocapture
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use ringq::Queue;

const PRODUCERS: usize = 4;
const CONSUMERS: usize = 4;
const PER_PRODUCER: usize = 10_000;

#[test]
fn concurrent_producers_preserve_per_producer_order() {
    ringq::init_tracing();

    let queue = Arc::new(Queue::new());
    let barrier = Arc::new(Barrier::new(PRODUCERS));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for seq in 0..PER_PRODUCER {
                    queue.add((producer, seq));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(queue.len(), PRODUCERS * PER_PRODUCER);

    // Items from one producer must come out in the order it added them.
    let mut next_seq = [0usize; PRODUCERS];
    while let Some((producer, seq)) = queue.try_pop() {
        assert_eq!(seq, next_seq[producer], "producer {producer} out of order");
        next_seq[producer] += 1;
    }
    assert!(next_seq.iter().all(|&n| n == PER_PRODUCER));
    assert_eq!(queue.capacity(), 16);
}

#[test]
fn concurrent_producers_and_consumers_deliver_exactly_once() {
    ringq::init_tracing();

    let total = PRODUCERS * PER_PRODUCER;
    let queue = Arc::new(Queue::new());
    let consumed = Arc::new(AtomicUsize::new(0));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    queue.add(producer * PER_PRODUCER + seq);
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let consumed = Arc::clone(&consumed);
            thread::spawn(move || {
                let mut seen = Vec::new();
                while consumed.load(Ordering::Acquire) < total {
                    if let Some(value) = queue.try_pop() {
                        seen.push(value);
                        consumed.fetch_add(1, Ordering::AcqRel);
                    } else {
                        thread::yield_now();
                    }
                }
                seen
            })
        })
        .collect();

    for handle in producers {
        handle.join().unwrap();
    }

    let mut all = HashSet::with_capacity(total);
    for handle in consumers {
        for value in handle.join().unwrap() {
            assert!(all.insert(value), "value {value} delivered twice");
        }
    }

    assert_eq!(all.len(), total);
    assert!(queue.is_empty());
}

#[test]
fn consumer_panic_on_empty_does_not_wedge_queue() {
    let queue = Arc::new(Queue::<u32>::new());

    let worker = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.pop())
    };
    assert!(worker.join().is_err());

    // The panicking thread held the lock; other threads can still use it.
    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.add(42))
    };
    producer.join().unwrap();

    assert_eq!(queue.pop(), 42);
}

#[test]
fn resize_under_contention_keeps_length_consistent() {
    let queue = Arc::new(Queue::new());
    let barrier = Arc::new(Barrier::new(2));

    // One thread oscillates the queue across grow and shrink boundaries while
    // another reads the length; it must never exceed one batch.
    let writer = {
        let queue = Arc::clone(&queue);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                queue.add_all(0..100u32);
                for _ in 0..100 {
                    queue.pop();
                }
            }
        })
    };

    barrier.wait();
    while !writer.is_finished() {
        let len = queue.len();
        assert!(len <= 100, "length {len} exceeds one batch");
        assert!(queue.capacity() >= 16);
    }
    writer.join().unwrap();

    assert!(queue.is_empty());
}
