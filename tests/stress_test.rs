//! Stress tests for the worker pool.

use stoker::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

fn wait_until_idle(pool: &ThreadPool) {
    let deadline = Instant::now() + Duration::from_secs(60);
    while pool.pending_tasks() > 0 {
        assert!(Instant::now() < deadline, "pool wedged under load");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
#[ignore] // Run with --ignored flag
fn stress_test_many_small_tasks() {
    let pool = ThreadPool::with_threads(8).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    for round in 0..100 {
        for _ in 0..1000 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        }
        wait_until_idle(&pool);
        assert_eq!(
            counter.load(Ordering::Relaxed),
            (round + 1) * 1000,
            "round {} lost tasks",
            round
        );
    }
}

#[test]
#[ignore]
fn stress_test_producer_flood() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 10_000;

    let pool = Arc::new(ThreadPool::with_threads(4).unwrap());
    let counter = Arc::new(AtomicUsize::new(0));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..PER_PRODUCER {
                    let counter = Arc::clone(&counter);
                    pool.submit(move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                    })
                    .unwrap();
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }

    wait_until_idle(&pool);
    assert_eq!(counter.load(Ordering::Relaxed), PRODUCERS * PER_PRODUCER);
}

#[test]
#[ignore]
fn stress_test_rapid_create_destroy() {
    for _ in 0..100 {
        let pool = ThreadPool::with_threads(4).unwrap();
        for _ in 0..10 {
            pool.submit(|| {}).unwrap();
        }
        // Implicit shutdown on drop; queued leftovers are discarded.
    }
}

#[test]
#[ignore]
fn stress_test_submit_terminate_race() {
    for _ in 0..50 {
        let pool = Arc::new(ThreadPool::with_threads(4).unwrap());

        let producer = {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let mut accepted = 0usize;
                loop {
                    match pool.submit(|| {}) {
                        Ok(()) => accepted += 1,
                        Err(Error::Terminated) => break,
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
                accepted
            })
        };

        thread::sleep(Duration::from_millis(1));
        pool.terminate();
        let accepted = producer.join().unwrap();

        let mut pool = Arc::try_unwrap(pool).expect("producer exited, sole owner");
        pool.wait_done();

        let executed = pool.stats().tasks_executed as usize;
        assert!(
            executed <= accepted,
            "executed {} tasks but only {} were accepted",
            executed,
            accepted
        );
    }
}

#[test]
#[ignore]
fn stress_test_single_worker_long_fifo_chain() {
    const TASKS: usize = 50_000;

    let pool = ThreadPool::with_threads(1).unwrap();
    let (tx, rx) = mpsc::channel();

    for i in 0..TASKS {
        let tx = tx.clone();
        pool.submit(move || {
            tx.send(i).unwrap();
        })
        .unwrap();
    }
    drop(tx);

    let mut expected = 0usize;
    for got in rx.iter() {
        assert_eq!(got, expected, "order broke at position {}", expected);
        expected += 1;
    }
    assert_eq!(expected, TASKS);
}
