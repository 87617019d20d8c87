//! Error types for pool creation and submission.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when building or feeding a pool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration, reported before any thread is spawned.
    #[error("config error: {0}")]
    Config(String),

    /// A worker thread could not be created. Pool creation unwinds fully
    /// before returning this: already-spawned workers are terminated and
    /// joined, so no partial pool ever escapes.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// `submit` after `terminate`. Distinct from the resource errors so
    /// callers can tell "stop submitting" apart from "try again later".
    #[error("pool terminated")]
    Terminated,

    /// The global pool was used before [`init`](crate::runtime::init).
    #[error("runtime not initialized")]
    NotInitialized,

    /// [`init`](crate::runtime::init) was called twice without an
    /// intervening [`shutdown`](crate::runtime::shutdown).
    #[error("already initialized")]
    AlreadyInitialized,
}

impl Error {
    /// Build a [`Error::Config`] from any message.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// True for the post-termination rejection, the one failure callers are
    /// expected to hit during routine shutdown.
    pub fn is_terminated(&self) -> bool {
        matches!(self, Error::Terminated)
    }
}
