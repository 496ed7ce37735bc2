//! Task: the unit of work handed to the runner.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{RunError, TaskError};

/// Result a task body returns.
pub type TaskResult = Result<(), TaskError>;

type BoxedTaskWork = Box<dyn FnOnce() -> TaskResult + Send + 'static>;

/// A zero-argument unit of work that succeeds or fails once.
///
/// Ownership moves into the runner; the body runs at most once on a worker
/// thread and is then dropped.
pub struct Task {
    work: BoxedTaskWork,
}

impl Task {
    pub fn new<F>(work: F) -> Self
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        Self {
            work: Box::new(work),
        }
    }

    /// Run the body, turning a panic into [`RunError::Panicked`].
    pub(crate) fn execute(self) -> Result<(), RunError> {
        match panic::catch_unwind(AssertUnwindSafe(self.work)) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(RunError::Task(err)),
            Err(payload) => Err(RunError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl<F> From<F> for Task
where
    F: FnOnce() -> TaskResult + Send + 'static,
{
    fn from(work: F) -> Self {
        Self::new(work)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let task = Task::new(|| Ok(()));
        assert!(task.execute().is_ok());
    }

    #[test]
    fn test_failure_is_passed_through() {
        let task = Task::new(|| Err("request timeout".into()));
        let err = task.execute().unwrap_err();
        assert_eq!(err.to_string(), "request timeout");
        assert!(matches!(err, RunError::Task(_)));
    }

    #[test]
    fn test_panic_is_caught() {
        let task = Task::new(|| panic!("worker blew up"));
        match task.execute() {
            Err(RunError::Panicked(message)) => assert_eq!(message, "worker blew up"),
            other => panic!("Expected Panicked, got: {:?}", other),
        }
    }

    #[test]
    fn test_formatted_panic_message() {
        let task = Task::new(|| panic!("chunk {} failed", 7));
        match task.execute() {
            Err(RunError::Panicked(message)) => assert_eq!(message, "chunk 7 failed"),
            other => panic!("Expected Panicked, got: {:?}", other),
        }
    }

    #[test]
    fn test_from_closure() {
        let task: Task = (|| Ok(())).into();
        assert_eq!(format!("{task:?}"), "Task { .. }");
    }
}
