//! Benchmarks comparing stoker to the `threadpool` crate.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::mpsc;

fn stoker_submit_drain(c: &mut Criterion) {
    let pool = stoker::ThreadPool::with_threads(4).unwrap();

    let mut group = c.benchmark_group("submit_drain");

    for size in [100usize, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("stoker", size), size, |b, &size| {
            b.iter(|| {
                let (tx, rx) = mpsc::channel();
                for i in 0..size {
                    let tx = tx.clone();
                    pool.submit(move || {
                        tx.send(black_box(i)).unwrap();
                    })
                    .unwrap();
                }
                drop(tx);
                assert_eq!(rx.iter().count(), size);
            });
        });
    }

    group.finish();
}

fn threadpool_submit_drain(c: &mut Criterion) {
    let pool = threadpool::ThreadPool::new(4);

    let mut group = c.benchmark_group("submit_drain");

    for size in [100usize, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("threadpool", size), size, |b, &size| {
            b.iter(|| {
                let (tx, rx) = mpsc::channel();
                for i in 0..size {
                    let tx = tx.clone();
                    pool.execute(move || {
                        tx.send(black_box(i)).unwrap();
                    });
                }
                drop(tx);
                assert_eq!(rx.iter().count(), size);
            });
        });
    }

    group.finish();
}

fn stoker_single_task(c: &mut Criterion) {
    let pool = stoker::ThreadPool::with_threads(1).unwrap();

    c.bench_function("stoker_single_task", |b| {
        b.iter(|| {
            let (tx, rx) = mpsc::channel();
            pool.submit(move || {
                tx.send(()).unwrap();
            })
            .unwrap();
            rx.recv().unwrap();
        });
    });
}

fn threadpool_single_task(c: &mut Criterion) {
    let pool = threadpool::ThreadPool::new(1);

    c.bench_function("threadpool_single_task", |b| {
        b.iter(|| {
            let (tx, rx) = mpsc::channel();
            pool.execute(move || {
                tx.send(()).unwrap();
            });
            rx.recv().unwrap();
        });
    });
}

fn stoker_pool_construction(c: &mut Criterion) {
    c.bench_function("stoker_create_4_workers", |b| {
        b.iter(|| {
            let pool = stoker::ThreadPool::with_threads(4).unwrap();
            black_box(&pool);
            // Drop joins the workers, so teardown is part of the cost.
        });
    });
}

criterion_group!(
    benches,
    stoker_submit_drain,
    threadpool_submit_drain,
    stoker_single_task,
    threadpool_single_task,
    stoker_pool_construction
);
criterion_main!(benches);
