//! Worker pool: a fixed set of OS threads draining one shared task queue.
//!
//! Workers pull from the queue until it is closed and empty, run each task
//! synchronously and push the outcome to the results channel. A supervisor
//! thread joins every worker and then releases the last results sender, which
//! is what lets the collector see the channel close.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::config::RunConfig;
use crate::error::RunError;
use crate::task::Task;

/// What a worker reports for one task.
pub(crate) type Outcome = Result<(), RunError>;

/// Spawn `config.worker_count` workers plus their supervisor.
///
/// On error, workers that did start exit as soon as the caller drops the
/// queue sender.
pub(crate) fn spawn_pool(
    config: &RunConfig,
    queue: mpsc::Receiver<Task>,
    results: mpsc::Sender<Outcome>,
) -> Result<(), RunError> {
    let queue = Arc::new(Mutex::new(queue));
    let mut handles = Vec::with_capacity(config.worker_count);

    for index in 0..config.worker_count {
        let queue = Arc::clone(&queue);
        let results = results.clone();
        let handle = thread::Builder::new()
            .name(format!("{}-{}", config.thread_name, index))
            .spawn(move || work(index, &queue, &results))?;
        handles.push(handle);
    }

    thread::Builder::new()
        .name(format!("{}-supervisor", config.thread_name))
        .spawn(move || {
            for handle in handles {
                if handle.join().is_err() {
                    warn!("worker thread terminated by panic");
                }
            }
            drop(results);
            debug!("worker pool drained");
        })?;

    Ok(())
}

fn work(worker: usize, queue: &Mutex<mpsc::Receiver<Task>>, results: &mpsc::Sender<Outcome>) {
    trace!(worker, "worker started");
    let mut executed = 0usize;

    loop {
        // Lock released before the task runs.
        let next = queue.lock().blocking_recv();
        let Some(task) = next else {
            break;
        };

        let outcome = task.execute();
        executed += 1;
        if let Err(RunError::Panicked(message)) = &outcome {
            warn!(worker, panic = %message, "task panicked");
        }

        if results.blocking_send(outcome).is_err() {
            trace!(worker, "result collector gone, outcome discarded");
        }
    }

    trace!(worker, executed, "worker exiting");
}
