//! The fixed-size worker pool.

use super::queue::TaskQueue;
use super::task::Task;
use super::worker::{Worker, WorkerState};
use crate::config::Config;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[cfg(feature = "telemetry")]
use crate::telemetry::{Metrics, MetricsSnapshot};

#[cfg(target_os = "linux")]
fn pin_thread_to_core(core_id: usize) {
    unsafe {
        let mut cpuset: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_SET(core_id, &mut cpuset);
        let result = libc::sched_setaffinity(
            0, // current thread
            std::mem::size_of::<libc::cpu_set_t>(),
            &cpuset,
        );
        if result != 0 {
            eprintln!(
                "failed to pin thread {} to core {}",
                thread::current().name().unwrap_or("unknown"),
                core_id
            );
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn pin_thread_to_core(_core_id: usize) {}

/// A fixed-size pool of worker threads fed from one shared FIFO queue.
///
/// The worker count is set at construction and never changes. Tasks are
/// closures, submitted fire-and-forget; they run in submission order in the
/// sense that workers always take the oldest queued task next.
///
/// Dropping the pool shuts it down: workers are told to quit, joined, and
/// any tasks still queued are discarded without running.
pub struct ThreadPool {
    workers: Vec<WorkerHandle>,
    queue: Arc<TaskQueue>,
    quit: Arc<AtomicBool>,
    pending_tasks: Arc<AtomicUsize>,
    num_threads: usize,
    #[cfg(feature = "telemetry")]
    metrics: Arc<Metrics>,
}

struct WorkerHandle {
    state: Arc<WorkerState>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool as configured.
    ///
    /// All workers are up when this returns. If any spawn fails, the workers
    /// that did start are told to quit and joined before the error comes
    /// back, so a half-built pool never escapes.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let num_threads = config.worker_threads();
        if num_threads == 0 {
            return Err(Error::config("need at least 1 worker thread"));
        }

        let queue = Arc::new(TaskQueue::new());
        let quit = Arc::new(AtomicBool::new(false));
        let pending_tasks = Arc::new(AtomicUsize::new(0));

        #[cfg(feature = "telemetry")]
        let metrics = Arc::new(Metrics::new());

        let mut workers: Vec<WorkerHandle> = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let worker = Worker::new(id);

            #[cfg(feature = "telemetry")]
            let worker = worker.with_metrics(metrics.clone());

            let state = Arc::clone(&worker.state);
            let queue_clone = queue.clone();
            let quit_clone = quit.clone();
            let pending_clone = pending_tasks.clone();
            let pin_workers = config.pin_workers;

            let mut builder = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name_prefix, worker.id));

            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let spawned = builder.spawn(move || {
                if pin_workers {
                    pin_thread_to_core(worker.id);
                }
                worker.run(queue_clone, quit_clone, pending_clone);
            });

            let thread = match spawned {
                Ok(thread) => thread,
                Err(e) => {
                    // Unwind the workers that did start before reporting.
                    quit.store(true, Ordering::Release);
                    queue.unblock();
                    for worker in &mut workers {
                        if let Some(thread) = worker.thread.take() {
                            let _ = thread.join();
                        }
                    }
                    return Err(Error::Spawn(e));
                }
            };

            workers.push(WorkerHandle {
                state,
                thread: Some(thread),
            });
        }

        Ok(Self {
            workers,
            queue,
            quit,
            pending_tasks,
            num_threads,
            #[cfg(feature = "telemetry")]
            metrics,
        })
    }

    /// Pool with `num_threads` workers and default settings otherwise.
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        let config = Config::builder().num_threads(num_threads).build()?;
        Self::new(&config)
    }

    /// Hand a closure to the pool.
    ///
    /// Fire-and-forget: there is no handle to the task and no way to observe
    /// its result except through state the closure captures. Fails with
    /// [`Error::Terminated`] once [`terminate`](Self::terminate) has been
    /// called. The check is best-effort; a submit racing `terminate` may
    /// slip in, and such a task is either drained by an exiting worker or
    /// discarded with the pool.
    pub fn submit<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.quit.load(Ordering::Acquire) {
            #[cfg(feature = "telemetry")]
            self.metrics.record_task_rejected();
            return Err(Error::Terminated);
        }

        self.pending_tasks.fetch_add(1, Ordering::Relaxed);
        self.queue.enqueue(Task::new(f));
        Ok(())
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Tasks submitted but not yet finished, queued plus currently running.
    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks.load(Ordering::Relaxed)
    }

    /// Point-in-time counters, aggregated over all workers.
    pub fn stats(&self) -> PoolStats {
        let mut tasks_executed = 0;
        let mut idle_time_ns = 0;
        for worker in &self.workers {
            tasks_executed += worker.state.tasks_executed.load(Ordering::Relaxed);
            idle_time_ns += worker.state.idle_time_ns.load(Ordering::Relaxed);
        }

        PoolStats {
            num_threads: self.num_threads,
            queued_tasks: self.queue.len(),
            pending_tasks: self.pending_tasks(),
            tasks_executed,
            idle_time_ns,
        }
    }

    /// Snapshot of task latency and timing metrics.
    #[cfg(feature = "telemetry")]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Tell every worker to stop.
    ///
    /// Each worker finishes the task it is running, drains at most one more
    /// queued task, and exits. Later submits are rejected. Safe to call more
    /// than once. Does not wait for the workers; pair with
    /// [`wait_done`](Self::wait_done).
    pub fn terminate(&self) {
        self.quit.store(true, Ordering::Release);
        self.queue.unblock();
    }

    /// Join every worker thread.
    ///
    /// Blocks until all workers have exited; returns immediately if they
    /// already have. Call [`terminate`](Self::terminate) first, otherwise
    /// the workers loop forever waiting for work and so does this. A worker
    /// killed by a panicking task counts as exited.
    pub fn wait_done(&mut self) {
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }

    /// [`terminate`](Self::terminate) followed by [`wait_done`](Self::wait_done).
    pub fn shutdown(&mut self) {
        self.terminate();
        self.wait_done();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.num_threads)
            .field("pending_tasks", &self.pending_tasks())
            .field("terminated", &self.quit.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Counters describing pool activity at one instant.
///
/// The fields are read individually with relaxed atomics, so a snapshot
/// taken while the pool is busy is approximate.
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Worker thread count.
    pub num_threads: usize,
    /// Tasks sitting in the queue, not yet picked up by a worker.
    pub queued_tasks: usize,
    /// Tasks submitted but not yet finished, queued plus running.
    pub pending_tasks: usize,
    /// Tasks finished across all workers.
    pub tasks_executed: u64,
    /// Total time workers have spent waiting for work, in nanoseconds.
    pub idle_time_ns: u64,
}
