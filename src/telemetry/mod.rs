//! Telemetry and observability subsystem.
//!
//! Provides latency and timing metrics for monitoring pool behavior. Gated
//! behind the `telemetry` feature; with the feature off, a zero-cost stub
//! keeps the API in place.

#[cfg(feature = "telemetry")]
pub mod metrics;

#[cfg(feature = "telemetry")]
pub use metrics::{Metrics, MetricsSnapshot};

// Stub implementations when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub mod metrics {
    //! No-op metrics stub.

    /// Pool metrics collector (no-op stub).
    #[derive(Debug, Clone, Default)]
    pub struct Metrics;

    impl Metrics {
        /// Create a new metrics collector.
        pub fn new() -> Self {
            Self
        }
        /// Record one finished task and how long it ran.
        pub fn record_task_execution(&self, _duration_ns: u64) {}
        /// Record a submission rejected because the pool was terminated.
        pub fn record_task_rejected(&self) {}
        /// Record time a worker spent waiting for work.
        pub fn record_idle_time(&self, _duration_ns: u64) {}
        /// Get a snapshot of current metrics.
        pub fn snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot::default()
        }
    }

    /// Snapshot of metrics at a point in time (no-op stub).
    #[derive(Debug, Clone, Default)]
    pub struct MetricsSnapshot {
        /// Tasks finished.
        pub tasks_executed: u64,
        /// Submissions rejected after termination.
        pub tasks_rejected: u64,
        /// Total worker time spent waiting for work, in nanoseconds.
        pub idle_time_ns: u64,
        /// Total worker time spent running tasks, in nanoseconds.
        pub busy_time_ns: u64,
    }
}

#[cfg(not(feature = "telemetry"))]
pub use metrics::{Metrics, MetricsSnapshot};
