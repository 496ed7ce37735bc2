//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use turul_task_runner::prelude::*;
//! ```

pub use crate::cancellation::CancellationContext;
pub use crate::config::RunConfig;
pub use crate::error::{CancelReason, RunError, TaskError};
pub use crate::runner::{TaskRunner, run_parallel};
pub use crate::task::{Task, TaskResult};
