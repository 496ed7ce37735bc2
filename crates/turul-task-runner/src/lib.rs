//! # Parallel Task Runner
//!
//! **Bounded worker-pool execution of independent tasks with cooperative cancellation.**
//!
//! A run fans a list of [`Task`]s out to exactly `worker_count` OS threads,
//! collects their outcomes and reports the first failure, if any. A
//! [`CancellationContext`] (explicit cancel or deadline) is checked while
//! tasks are being submitted and while results are being collected.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use turul_task_runner::prelude::*;
//!
//! # async fn example() -> Result<(), RunError> {
//! let total = Arc::new(AtomicU64::new(0));
//! let tasks: Vec<Task> = (1..=10u64)
//!     .map(|n| {
//!         let total = Arc::clone(&total);
//!         Task::new(move || {
//!             total.fetch_add(n, Ordering::Relaxed);
//!             Ok(())
//!         })
//!     })
//!     .collect();
//!
//! let ctx = CancellationContext::with_timeout(std::time::Duration::from_secs(5));
//! run_parallel(&ctx, tasks, &RunConfig::new(3)).await?;
//! assert_eq!(total.load(Ordering::Relaxed), 55);
//! # Ok(())
//! # }
//! ```
//!
//! A context with a deadline needs a Tokio runtime with the time driver
//! enabled (`#[tokio::main]` or `Builder::enable_time`).
//! [`TaskRunner::run_blocking`] builds one for you.
//!
//! ## Architecture
//!
//! - **`TaskRunner`**: validates a `RunConfig` and drives one run per call
//! - **`CancellationContext`**: watch-channel cancel signal plus optional deadline
//! - **Worker pool**: named OS threads sharing one queue; a supervisor thread
//!   closes the results channel once every worker has exited
//! - **`RunError`**: task failure, panic, cancellation or caller error

pub mod cancellation;
pub mod config;
pub mod error;
pub mod prelude;
pub mod runner;
pub mod task;
mod worker;

// Re-exports for convenience
pub use cancellation::CancellationContext;
pub use config::RunConfig;
pub use error::{CancelReason, RunError, TaskError};
pub use runner::{TaskRunner, run_parallel};
pub use task::{Task, TaskResult};
