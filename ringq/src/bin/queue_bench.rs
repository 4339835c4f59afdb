//! Queue throughput and latency benchmark.
//!
//! Usage:
//!     cargo run --release --bin queue_bench
//!
//! Environment variables:
//!     ITERATIONS=1048576  Operations per benchmark (default: 2^20)
//!     PRODUCER_CPU=0      Pin producer to CPU 0 (default: 0)
//!     CONSUMER_CPU=2      Pin consumer to CPU 2 (default: 2)
//!
//! Build with `--features tracing` and set `RINGQ_LOG=ringq=trace` to watch
//! resize events (slow; not for timing runs).

use std::env;
use std::hint;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use minstant::Instant;

use ringq::Queue;

const DEFAULT_ITERATIONS: usize = 1 << 20;

type Payload = u64;

fn env_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

fn get_cpu_affinity() -> (Option<usize>, Option<usize>) {
    let producer_cpu = env_usize("PRODUCER_CPU").or(Some(0));
    let consumer_cpu = env_usize("CONSUMER_CPU").or(Some(2));
    (producer_cpu, consumer_cpu)
}

fn pin_to_cpu(cpu: Option<usize>) {
    if let Some(id) = cpu {
        core_affinity::set_for_current(core_affinity::CoreId { id });
    }
}

fn report(label: &str, iterations: usize, start: Instant) {
    let elapsed = start.elapsed();
    let ns_per_op = elapsed.as_nanos() / iterations as u128;
    let ops_per_ms = iterations as u128 * 1_000_000 / elapsed.as_nanos().max(1);
    println!("{label:<12} {ops_per_ms:>8} ops/ms {ns_per_op:>6} ns/op");
}

/// Add everything, then pop everything: exercises every grow and shrink step.
fn bench_serial(iterations: usize) {
    let queue = Queue::new();

    let start = Instant::now();
    for i in 0..iterations as Payload {
        queue.add(i);
    }
    for expected in 0..iterations as Payload {
        let value = queue.pop();
        if value != expected {
            panic!("Data corruption: expected {}, got {}", expected, value);
        }
    }
    report("serial", iterations * 2, start);
}

/// Alternating add/pop: the buffer never resizes.
fn bench_tick_tock(iterations: usize) {
    let queue = Queue::new();

    let start = Instant::now();
    for i in 0..iterations as Payload {
        queue.add(i);
        hint::black_box(queue.pop());
    }
    report("tick-tock", iterations * 2, start);
}

/// One producer and one consumer thread contending on the lock.
fn bench_contended(iterations: usize, producer_cpu: Option<usize>, consumer_cpu: Option<usize>) {
    let queue = Arc::new(Queue::new());

    let ready = Arc::new(AtomicBool::new(false));
    let ready_clone = Arc::clone(&ready);
    let consumer_queue = Arc::clone(&queue);

    // Consumer thread
    let consumer_thread = std::thread::spawn(move || {
        pin_to_cpu(consumer_cpu);

        // Signal ready
        ready_clone.store(true, Ordering::Release);

        for expected in 0..iterations as Payload {
            loop {
                if let Some(value) = consumer_queue.try_pop() {
                    if value != expected {
                        panic!("Data corruption: expected {}, got {}", expected, value);
                    }
                    break;
                }
                hint::spin_loop();
            }
        }
    });

    // Wait for consumer to be ready
    while !ready.load(Ordering::Acquire) {
        hint::spin_loop();
    }

    pin_to_cpu(producer_cpu);

    let start = Instant::now();
    for i in 0..iterations as Payload {
        queue.add(i);
    }

    consumer_thread.join().unwrap();
    report("contended", iterations, start);
}

fn main() {
    ringq::init_tracing();

    let iterations = env_usize("ITERATIONS").unwrap_or(DEFAULT_ITERATIONS);
    let (producer_cpu, consumer_cpu) = get_cpu_affinity();

    println!("ringq Queue (iters={}):", iterations);
    bench_serial(iterations);
    bench_tick_tock(iterations);
    bench_contended(iterations, producer_cpu, consumer_cpu);
}
