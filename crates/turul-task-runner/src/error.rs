//! Error types for parallel task execution.

/// Error reported by a task. Any `std::error::Error + Send + Sync` converts
/// into it with `?` or `.into()`.
pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a [`CancellationContext`](crate::CancellationContext) fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CancelReason {
    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Unified error type for a parallel run.
///
/// Only the first failure observed by the collector is reported; later
/// failures from the same run are dropped.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A task returned an error. Displays exactly as the task's own error.
    #[error(transparent)]
    Task(TaskError),

    #[error("task panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Cancelled(#[from] CancelReason),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to start worker pool: {0}")]
    Spawn(#[from] std::io::Error),
}

impl RunError {
    /// `true` for explicit cancellation and for deadline expiry.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, RunError::Cancelled(_))
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, RunError::Cancelled(CancelReason::DeadlineExceeded))
    }

    /// `true` when a task failed, by error or by panic.
    pub fn is_task_failure(&self) -> bool {
        matches!(self, RunError::Task(_) | RunError::Panicked(_))
    }

    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            RunError::Cancelled(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Borrow the task's original error, e.g. to `downcast_ref` it.
    pub fn task_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            RunError::Task(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Take back the task's original error, or return `self` unchanged.
    pub fn into_task_error(self) -> Result<TaskError, Self> {
        match self {
            RunError::Task(err) => Ok(err),
            other => Err(other),
        }
    }
}
