//! Configuration for a parallel run.

use std::num::NonZeroUsize;
use std::thread;

use crate::error::RunError;

const DEFAULT_THREAD_NAME: &str = "turul-worker";

/// Settings for one [`TaskRunner`](crate::TaskRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of worker threads, and so the maximum number of tasks running at once.
    pub worker_count: usize,
    /// Return the first task failure as soon as it is observed instead of
    /// draining every result.
    pub stop_on_error: bool,
    /// Prefix for worker thread names (`{thread_name}-{index}`).
    pub thread_name: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            worker_count: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(4),
            stop_on_error: false,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl RunConfig {
    /// Config with `worker_count` workers and defaults for everything else.
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }

    pub fn with_stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Reject settings the runner cannot honour.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.worker_count == 0 {
            return Err(RunError::InvalidArgument(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.thread_name.is_empty() {
            return Err(RunError::InvalidArgument(
                "thread_name must not be empty".to_string(),
            ));
        }
        if self.thread_name.contains('\0') {
            return Err(RunError::InvalidArgument(
                "thread_name must not contain NUL bytes".to_string(),
            ));
        }
        Ok(())
    }
}
