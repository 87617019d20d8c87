//! Task representation and execution.

/// Internal task representation.
///
/// A task is just a boxed closure. Submission is fire-and-forget: tasks carry
/// no identity, no priority, and no channel for a result. Anything the caller
/// wants back travels through state captured by the closure.
pub(crate) struct Task {
    func: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Create a new task from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Task { func: Box::new(f) }
    }

    /// Execute the task, consuming it.
    pub fn execute(self) {
        (self.func)();
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}
