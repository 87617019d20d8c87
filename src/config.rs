//! Pool configuration.

use crate::error::{Error, Result};

/// Construction parameters for a [`ThreadPool`](crate::ThreadPool).
///
/// The worker count is fixed for the life of the pool; everything else here
/// shapes how the worker threads are set up.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads. `None` means one per logical CPU.
    pub num_threads: Option<usize>,

    /// Prefix for worker thread names; workers are named `"<prefix>-<id>"`.
    pub thread_name_prefix: String,

    /// Stack size for each worker thread, in bytes.
    pub stack_size: Option<usize>,

    /// Pin worker `i` to core `i` (Linux only; ignored elsewhere).
    pub pin_workers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "stoker-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
            pin_workers: false,
        }
    }
}

impl Config {
    /// Start building a config.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Check the config for values the pool cannot honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_threads {
            if n == 0 {
                return Err(Error::config("num_threads must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("num_threads too large (max 1024)"));
            }
        }

        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }

        Ok(())
    }

    /// The worker count this config resolves to.
    pub fn worker_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the default config.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the worker count.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = Some(n);
        self
    }

    /// Set the worker thread name prefix.
    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker stack size in bytes.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    /// Pin workers to cores (Linux only).
    pub fn pin_workers(mut self, pin: bool) -> Self {
        self.config.pin_workers = pin;
        self
    }

    /// Validate and produce the config.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_cpu_count() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.worker_threads() >= 1);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = Config::builder()
            .num_threads(3)
            .thread_name_prefix("io")
            .stack_size(64 * 1024)
            .build()
            .unwrap();

        assert_eq!(config.worker_threads(), 3);
        assert_eq!(config.thread_name_prefix, "io");
        assert_eq!(config.stack_size, Some(64 * 1024));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = Config::builder().num_threads(0).build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_absurd_thread_count_rejected() {
        assert!(Config::builder().num_threads(100_000).build().is_err());
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(Config::builder().thread_name_prefix("").build().is_err());
    }
}
