//! Task execution infrastructure.
//!
//! This module provides the worker pool and its supporting pieces: the
//! shared FIFO task queue and the worker thread loop.

pub mod pool;
pub(crate) mod queue;
pub(crate) mod task;
pub(crate) mod worker;

pub use pool::{PoolStats, ThreadPool};
