//! Metrics collection for pool monitoring.

use hdrhistogram::Histogram;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Pool metrics collector.
///
/// Counters are relaxed atomics updated from the worker threads; the latency
/// histogram sits behind an `RwLock` and recording skips a sample rather
/// than contend with a snapshot in progress.
#[derive(Debug)]
pub struct Metrics {
    tasks_executed: AtomicU64,
    tasks_rejected: AtomicU64,

    idle_time_ns: AtomicU64,
    busy_time_ns: AtomicU64,

    latency_histogram: RwLock<Histogram<u64>>,

    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        // 3 significant figures, values up to one hour in nanoseconds.
        let histogram =
            Histogram::new_with_max(3_600_000_000_000, 3).expect("failed to create histogram");

        Self {
            tasks_executed: AtomicU64::new(0),
            tasks_rejected: AtomicU64::new(0),
            idle_time_ns: AtomicU64::new(0),
            busy_time_ns: AtomicU64::new(0),
            latency_histogram: RwLock::new(histogram),
            start_time: Instant::now(),
        }
    }

    /// Record one finished task and how long it ran.
    pub fn record_task_execution(&self, duration_ns: u64) {
        self.tasks_executed.fetch_add(1, Ordering::Relaxed);
        self.busy_time_ns.fetch_add(duration_ns, Ordering::Relaxed);

        if let Some(mut hist) = self.latency_histogram.try_write() {
            let _ = hist.record(duration_ns);
        }
    }

    /// Record a submission rejected because the pool was terminated.
    pub fn record_task_rejected(&self) {
        self.tasks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record time a worker spent waiting for work.
    pub fn record_idle_time(&self, duration_ns: u64) {
        self.idle_time_ns.fetch_add(duration_ns, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let histogram = self.latency_histogram.read();

        MetricsSnapshot {
            timestamp: Instant::now(),
            uptime: self.start_time.elapsed(),
            tasks_executed: self.tasks_executed.load(Ordering::Relaxed),
            tasks_rejected: self.tasks_rejected.load(Ordering::Relaxed),
            idle_time_ns: self.idle_time_ns.load(Ordering::Relaxed),
            busy_time_ns: self.busy_time_ns.load(Ordering::Relaxed),
            avg_latency_ns: if histogram.len() > 0 {
                histogram.mean() as u64
            } else {
                0
            },
            p50_latency_ns: histogram.value_at_quantile(0.50),
            p95_latency_ns: histogram.value_at_quantile(0.95),
            p99_latency_ns: histogram.value_at_quantile(0.99),
            max_latency_ns: histogram.max(),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.tasks_executed.store(0, Ordering::Relaxed);
        self.tasks_rejected.store(0, Ordering::Relaxed);
        self.idle_time_ns.store(0, Ordering::Relaxed);
        self.busy_time_ns.store(0, Ordering::Relaxed);

        if let Some(mut hist) = self.latency_histogram.try_write() {
            hist.reset();
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// When the snapshot was taken.
    pub timestamp: Instant,
    /// Time since the collector was created.
    pub uptime: std::time::Duration,
    /// Tasks finished.
    pub tasks_executed: u64,
    /// Submissions rejected after termination.
    pub tasks_rejected: u64,
    /// Total worker time spent waiting for work, in nanoseconds.
    pub idle_time_ns: u64,
    /// Total worker time spent running tasks, in nanoseconds.
    pub busy_time_ns: u64,
    /// Mean task execution time, in nanoseconds.
    pub avg_latency_ns: u64,
    /// Median task execution time, in nanoseconds.
    pub p50_latency_ns: u64,
    /// 95th percentile task execution time, in nanoseconds.
    pub p95_latency_ns: u64,
    /// 99th percentile task execution time, in nanoseconds.
    pub p99_latency_ns: u64,
    /// Slowest recorded task execution time, in nanoseconds.
    pub max_latency_ns: u64,
}

impl MetricsSnapshot {
    /// Fraction of worker time spent running tasks, 0.0 to 1.0.
    pub fn utilization(&self) -> f64 {
        let total_time = self.idle_time_ns + self.busy_time_ns;
        if total_time == 0 {
            return 0.0;
        }
        self.busy_time_ns as f64 / total_time as f64
    }

    /// Tasks finished per second of uptime.
    pub fn tasks_per_second(&self) -> f64 {
        let seconds = self.uptime.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.tasks_executed as f64 / seconds
    }
}
