//! Small concurrency utilities shared across the crate.

pub mod cache_padded;
pub mod spin;

pub use cache_padded::CachePadded;
pub use spin::{SpinGuard, SpinLock};
