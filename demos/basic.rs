use stoker::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

fn main() {
    println!("=== Basic Worker Pool Example ===\n");

    // An owned pool with an explicit worker count.
    let pool = ThreadPool::with_threads(4).expect("Failed to create pool");
    println!("Created a pool with {} workers", pool.num_threads());

    // Fire-and-forget: nothing comes back from submit itself.
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..100 {
        let counter = Arc::clone(&counter);
        pool.submit(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .expect("pool is running");
    }

    // Results travel through whatever the closures capture.
    let (tx, rx) = mpsc::channel();
    for i in 0..10 {
        let tx = tx.clone();
        pool.submit(move || {
            tx.send(i * i).unwrap();
        })
        .expect("pool is running");
    }
    drop(tx);
    let squares: Vec<i32> = rx.iter().collect();
    println!("Squares came back: {:?}", squares);

    while pool.pending_tasks() > 0 {
        std::thread::yield_now();
    }
    println!("Counter reached {}", counter.load(Ordering::Relaxed));

    let stats = pool.stats();
    println!(
        "Executed {} tasks across {} workers",
        stats.tasks_executed, stats.num_threads
    );

    // The global instance, for programs that want exactly one pool.
    stoker::init().expect("Failed to init");
    let (tx, rx) = mpsc::channel();
    stoker::execute(move || {
        println!("Ran on the global pool");
        tx.send(()).unwrap();
    })
    .unwrap();
    rx.recv().unwrap();
    stoker::shutdown();

    println!("\n=== Example Complete ===");
}
