//! Process-wide pool instance.
//!
//! Most programs want exactly one pool. [`init`] builds it, [`execute`]
//! feeds it, and [`shutdown`] tears it down; everything is also available
//! through an owned [`ThreadPool`](crate::ThreadPool) for callers that want
//! several pools or explicit lifetimes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::ThreadPool;
use parking_lot::RwLock;
use std::sync::Arc;

/// A configured pool plus the config it was built from.
#[derive(Debug)]
pub struct Runtime {
    pool: Arc<ThreadPool>,
    config: Config,
}

impl Runtime {
    /// Validate `config` and spawn its pool.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let pool = ThreadPool::new(&config)?;

        Ok(Self {
            pool: Arc::new(pool),
            config,
        })
    }

    /// The pool this runtime drives.
    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    /// The config the pool was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Global runtime for the simple API
static GLOBAL_RUNTIME: RwLock<Option<Arc<Runtime>>> = RwLock::new(None);

/// Initialize the global pool with default settings.
pub fn init() -> Result<()> {
    init_with_config(Config::default())
}

/// Initialize the global pool with `config`.
///
/// Fails with [`Error::AlreadyInitialized`] if the global pool is already up
/// and has not been [`shutdown`].
pub fn init_with_config(config: Config) -> Result<()> {
    let mut runtime = GLOBAL_RUNTIME.write();

    if runtime.is_some() {
        return Err(Error::AlreadyInitialized);
    }

    *runtime = Some(Arc::new(Runtime::new(config)?));

    Ok(())
}

/// Submit a closure to the global pool.
pub fn execute<F>(f: F) -> Result<()>
where
    F: FnOnce() + Send + 'static,
{
    current_runtime()?.pool().submit(f)
}

fn current_runtime() -> Result<Arc<Runtime>> {
    GLOBAL_RUNTIME
        .read()
        .as_ref()
        .cloned()
        .ok_or(Error::NotInitialized)
}

/// Tear down the global pool.
///
/// Running tasks finish and queued tasks are discarded. The worker threads
/// are joined when the pool's last user lets go, which is before this
/// returns unless an [`execute`] call is in flight on another thread. A
/// no-op if [`init`] was never called.
pub fn shutdown() {
    let mut runtime = GLOBAL_RUNTIME.write();
    *runtime = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    // One test covers the whole lifecycle; the global state makes separate
    // tests race each other under the parallel test runner.
    #[test]
    fn test_global_lifecycle() {
        shutdown();

        init().unwrap();
        assert!(matches!(init(), Err(Error::AlreadyInitialized)));

        let (tx, rx) = mpsc::channel();
        execute(move || {
            tx.send(42).unwrap();
        })
        .unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);

        shutdown();
        assert!(matches!(
            execute(|| {}),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_runtime_owns_its_pool() {
        let config = Config::builder().num_threads(2).build().unwrap();
        let runtime = Runtime::new(config).unwrap();

        assert_eq!(runtime.pool().num_threads(), 2);
        assert_eq!(runtime.config().worker_threads(), 2);
    }
}
