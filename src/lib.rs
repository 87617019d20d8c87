//! Stoker - a fixed-size worker thread pool.
//!
//! A small pool: N worker threads pulling from one shared FIFO queue of
//! boxed closures. Submission is fire-and-forget, the worker count never
//! changes, and shutdown is explicit and predictable. Queue order is global,
//! so with a single worker tasks run exactly in submission order.
//!
//! # Quick Start
//!
//! ```
//! use stoker::ThreadPool;
//! use std::sync::mpsc;
//!
//! let pool = ThreadPool::with_threads(4).unwrap();
//!
//! let (tx, rx) = mpsc::channel();
//! for i in 0..8 {
//!     let tx = tx.clone();
//!     pool.submit(move || {
//!         tx.send(i * i).unwrap();
//!     })
//!     .unwrap();
//! }
//! drop(tx);
//!
//! let sum: i32 = rx.iter().sum();
//! assert_eq!(sum, 140);
//! ```
//!
//! # Features
//!
//! - **Fixed-size**: all workers are spawned up front; creation fails cleanly
//!   if any thread cannot start
//! - **FIFO dispatch**: one shared queue, oldest task first
//! - **Predictable shutdown**: `terminate` stops the workers, `wait_done`
//!   joins them, and whatever is still queued is discarded without running
//! - **Global instance**: optional process-wide pool behind `init`/`execute`
//! - **Telemetry**: latency histograms and utilization counters (optional)
//! - **Core pinning**: workers can be pinned to cores on Linux

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod runtime;
pub mod telemetry;
mod util;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use executor::{PoolStats, ThreadPool};
pub use runtime::{execute, init, init_with_config, shutdown};
