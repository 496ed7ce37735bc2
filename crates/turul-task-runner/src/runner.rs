//! Task runner: bounded fan-out of independent tasks with first-error aggregation.
//!
//! One run:
//!
//! ```text
//! validate config -> spawn workers -> submit tasks -> close queue -> collect results
//!                                         ^                              ^
//!                                         +---- cancellation checked ----+
//! ```
//!
//! The queue and the results channel are both sized to the task count, so
//! submission never waits on a worker; the only thing it reacts to is the
//! cancellation context. Tasks that were submitted before the runner returns
//! still run exactly once in the background.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::cancellation::CancellationContext;
use crate::config::RunConfig;
use crate::error::RunError;
use crate::task::Task;
use crate::worker::{self, Outcome};

/// Runs task lists on a fixed number of worker threads.
#[derive(Debug, Clone)]
pub struct TaskRunner {
    config: RunConfig,
}

impl TaskRunner {
    /// Create a runner, rejecting an invalid config up front.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run every task, returning the first failure or cancellation observed.
    ///
    /// A `ctx` with a deadline needs a runtime with the time driver enabled
    /// (`#[tokio::main]`, or a builder with `enable_time()`).
    ///
    /// With `stop_on_error`, the first failure is returned as soon as it
    /// arrives. Otherwise all results are drained and the first failure in
    /// arrival order is returned. Which of several concurrent failures counts
    /// as "first" is decided by completion order and is not deterministic.
    pub async fn run(&self, ctx: &CancellationContext, tasks: Vec<Task>) -> Result<(), RunError> {
        let total = tasks.len();
        let capacity = total.max(1);
        let (queue_tx, queue_rx) = mpsc::channel::<Task>(capacity);
        let (results_tx, mut results_rx) = mpsc::channel::<Outcome>(capacity);

        debug!(
            workers = self.config.worker_count,
            tasks = total,
            stop_on_error = self.config.stop_on_error,
            "starting parallel run"
        );

        worker::spawn_pool(&self.config, queue_rx, results_tx)?;

        for task in tasks {
            tokio::select! {
                biased;
                reason = ctx.cancelled() => {
                    debug!(%reason, "run cancelled during submission");
                    return Err(reason.into());
                }
                sent = queue_tx.send(task) => {
                    // Workers hold the receiver until this sender is dropped.
                    debug_assert!(sent.is_ok(), "task queue closed during submission");
                }
            }
        }
        drop(queue_tx);

        let mut first_error: Option<RunError> = None;
        let mut completed = 0usize;

        loop {
            tokio::select! {
                biased;
                reason = ctx.cancelled() => {
                    debug!(%reason, completed, "run cancelled while collecting results");
                    return Err(reason.into());
                }
                outcome = results_rx.recv() => match outcome {
                    None => break,
                    Some(Ok(())) => completed += 1,
                    Some(Err(err)) => {
                        completed += 1;
                        if self.config.stop_on_error {
                            debug!(completed, error = %err, "stopping on first task failure");
                            return Err(err);
                        }
                        if first_error.is_none() {
                            first_error = Some(err);
                        } else {
                            trace!(error = %err, "dropping additional task failure");
                        }
                    }
                },
            }
        }

        debug!(completed, failed = first_error.is_some(), "parallel run finished");
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Drive [`run`](Self::run) to completion from synchronous code.
    ///
    /// Builds a private current-thread runtime for the call. Must not be
    /// called from inside an async context.
    pub fn run_blocking(
        &self,
        ctx: &CancellationContext,
        tasks: Vec<Task>,
    ) -> Result<(), RunError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(self.run(ctx, tasks))
    }
}

/// Run `tasks` on `config.worker_count` workers under `ctx`.
///
/// Convenience wrapper around [`TaskRunner::new`] and [`TaskRunner::run`],
/// with the same runtime requirements.
pub async fn run_parallel(
    ctx: &CancellationContext,
    tasks: Vec<Task>,
    config: &RunConfig,
) -> Result<(), RunError> {
    TaskRunner::new(config.clone())?.run(ctx, tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing_test::traced_test;

    fn counting_tasks(n: usize, counter: &Arc<AtomicUsize>) -> Vec<Task> {
        (0..n)
            .map(|_| {
                let counter = Arc::clone(counter);
                Task::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect()
    }

    #[tokio::test]
    async fn test_single_task() {
        let ctx = CancellationContext::new();
        let tasks = vec![Task::new(|| Ok(()))];
        assert!(run_parallel(&ctx, tasks, &RunConfig::new(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_single_failing_task_with_stop_on_error() {
        let ctx = CancellationContext::new();
        let tasks = vec![Task::new(|| Err("request timeout".into()))];
        let config = RunConfig::new(1).with_stop_on_error(true);

        let err = run_parallel(&ctx, tasks, &config).await.unwrap_err();
        assert_eq!(err.to_string(), "request timeout");
    }

    #[tokio::test]
    async fn test_all_success_with_stop_on_error() {
        let ctx = CancellationContext::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let config = RunConfig::new(3).with_stop_on_error(true);

        run_parallel(&ctx, counting_tasks(3, &counter), &config)
            .await
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_tasks() {
        let ctx = CancellationContext::new();
        assert!(
            run_parallel(&ctx, Vec::new(), &RunConfig::new(4))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_zero_workers_rejected_before_running() {
        let ctx = CancellationContext::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let err = run_parallel(&ctx, counting_tasks(5, &counter), &RunConfig::new(0))
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::InvalidArgument(_)));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unspawnable_thread_name_rejected_before_running() {
        let ctx = CancellationContext::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let config = RunConfig::new(2).with_thread_name("bad\0name");

        let err = run_parallel(&ctx, counting_tasks(3, &counter), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::InvalidArgument(_)));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        assert!(TaskRunner::new(RunConfig::new(0)).is_err());
        let runner = TaskRunner::new(RunConfig::new(2)).unwrap();
        assert_eq!(runner.config().worker_count, 2);
    }

    #[tokio::test]
    async fn test_already_cancelled_submits_nothing() {
        let ctx = CancellationContext::new();
        ctx.cancel();
        let counter = Arc::new(AtomicUsize::new(0));

        let err = run_parallel(&ctx, counting_tasks(10, &counter), &RunConfig::new(2))
            .await
            .unwrap_err();
        assert_eq!(err.cancel_reason(), Some(crate::CancelReason::Cancelled));

        // Nothing was queued, so nothing can run later either.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_run_blocking() {
        let ctx = CancellationContext::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let runner = TaskRunner::new(RunConfig::new(4)).unwrap();

        runner
            .run_blocking(&ctx, counting_tasks(20, &counter))
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_run_without_deadline_on_runtime_without_time_driver() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let ctx = CancellationContext::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let config = RunConfig::new(2);

        runtime
            .block_on(run_parallel(&ctx, counting_tasks(5, &counter), &config))
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    #[traced_test]
    fn test_run_logs_start_and_finish() {
        let ctx = CancellationContext::new();
        let runner = TaskRunner::new(RunConfig::new(2)).unwrap();
        runner
            .run_blocking(&ctx, vec![Task::new(|| Ok(()))])
            .unwrap();

        assert!(logs_contain("starting parallel run"));
        assert!(logs_contain("parallel run finished"));
    }
}
