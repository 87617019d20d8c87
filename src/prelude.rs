//! Convenience re-exports for the common path.

pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::executor::{PoolStats, ThreadPool};

pub use crate::{execute, init, init_with_config, shutdown};

#[cfg(feature = "telemetry")]
pub use crate::telemetry::{Metrics, MetricsSnapshot};
