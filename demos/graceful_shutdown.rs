//! Shutdown walkthrough: draining a pool versus cutting it loose.

use stoker::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    println!("=== Graceful Shutdown Example ===\n");

    demo_drain_then_stop();
    demo_stop_with_backlog();

    println!("\n=== Example Complete ===");
}

fn demo_drain_then_stop() {
    println!("1. Drain, then stop");

    let mut pool = ThreadPool::with_threads(2).expect("Failed to create pool");
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..20 {
        let done = Arc::clone(&done);
        pool.submit(move || {
            thread::sleep(Duration::from_millis(5));
            done.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
    }

    // Let the queue empty before asking the workers to quit.
    while pool.pending_tasks() > 0 {
        thread::sleep(Duration::from_millis(1));
    }
    pool.terminate();
    pool.wait_done();

    println!(
        "   ✓ All {} tasks finished before the workers exited\n",
        done.load(Ordering::Relaxed)
    );
}

fn demo_stop_with_backlog() {
    println!("2. Stop with a backlog");

    let mut pool = ThreadPool::with_threads(2).expect("Failed to create pool");
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..1000 {
        let done = Arc::clone(&done);
        pool.submit(move || {
            thread::sleep(Duration::from_millis(1));
            done.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
    }

    // Quit right away: running tasks finish, the backlog is discarded.
    pool.terminate();
    println!(
        "   Submission after terminate rejected: {}",
        pool.submit(|| {}).is_err()
    );
    pool.wait_done();

    println!(
        "   ✓ Workers exited after finishing {} of 1000 tasks; the rest were dropped",
        done.load(Ordering::Relaxed)
    );
}
