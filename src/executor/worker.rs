// worker thread loop
use super::queue::TaskQueue;
use super::task::Task;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "telemetry")]
use crate::telemetry::Metrics;

pub type WorkerId = usize;

// per-worker counters, shared with the pool for stats
pub struct WorkerState {
    pub tasks_executed: AtomicU64,
    pub idle_time_ns: AtomicU64,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            tasks_executed: AtomicU64::new(0),
            idle_time_ns: AtomicU64::new(0),
        }
    }
}

pub(crate) struct Worker {
    pub id: WorkerId,
    pub state: Arc<WorkerState>,
    #[cfg(feature = "telemetry")]
    pub metrics: Option<Arc<Metrics>>,
}

impl Worker {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            state: Arc::new(WorkerState::new()),
            #[cfg(feature = "telemetry")]
            metrics: None,
        }
    }

    #[cfg(feature = "telemetry")]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    // main loop: pull from the shared queue until told to quit
    //
    // After `quit` flips, a worker already inside `pop_blocking` may still
    // receive one queued task; it runs that task and exits on the next check.
    pub fn run(&self, queue: Arc<TaskQueue>, quit: Arc<AtomicBool>, pending: Arc<AtomicUsize>) {
        while !quit.load(Ordering::Acquire) {
            let wait_start = Instant::now();
            let task = match queue.pop_blocking() {
                Some(task) => task,
                // Unblocked and drained; nothing more is coming.
                None => break,
            };

            let waited_ns = wait_start.elapsed().as_nanos() as u64;
            self.state.idle_time_ns.fetch_add(waited_ns, Ordering::Relaxed);
            #[cfg(feature = "telemetry")]
            if let Some(ref metrics) = self.metrics {
                metrics.record_idle_time(waited_ns);
            }

            self.execute_task(task);
            pending.fetch_sub(1, Ordering::Relaxed);
        }
    }

    // Tasks run bare: a panicking task unwinds through here and takes this
    // worker with it, surfacing at join time.
    fn execute_task(&self, task: Task) {
        #[cfg(feature = "telemetry")]
        let start = Instant::now();

        task.execute();

        self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "telemetry")]
        if let Some(ref metrics) = self.metrics {
            metrics.record_task_execution(start.elapsed().as_nanos() as u64);
        }
    }
}
