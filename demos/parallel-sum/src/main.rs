//! Parallel Sum - chunked fan-out over the task runner
//!
//! Splits `1..=upper` into chunks, sums each chunk on a worker thread and
//! merges the partial sums through a `ConcurrentMap`.
//!
//! ```text
//! cargo run -p parallel-sum -- --upper 1000000 --chunk-size 10000 --workers 8
//! RUST_LOG=turul_task_runner=debug cargo run -p parallel-sum -- --fail-chunk 3
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use turul_concurrent::ConcurrentMap;
use turul_task_runner::prelude::*;

#[derive(Parser)]
#[command(name = "parallel-sum")]
#[command(about = "Sum a range of integers in parallel chunks")]
struct Cli {
    /// Sum the integers 1..=upper
    #[arg(long, default_value = "1000000")]
    upper: u64,

    /// Integers per task
    #[arg(long, default_value = "10000")]
    chunk_size: usize,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Give up after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Return as soon as one chunk fails
    #[arg(long)]
    stop_on_error: bool,

    /// Make the chunk with this index fail, to see error reporting
    #[arg(long)]
    fail_chunk: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let data: Vec<u64> = (1..=cli.upper).collect();
    let chunks = turul_seq::chunk(&data, cli.chunk_size).context("invalid --chunk-size")?;

    let partials = Arc::new(ConcurrentMap::<usize, u64>::with_capacity(chunks.len()));
    let tasks: Vec<Task> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let chunk = chunk.to_vec();
            let partials = Arc::clone(&partials);
            let fail = cli.fail_chunk == Some(index);
            Task::new(move || {
                if fail {
                    return Err(format!("chunk {index} rejected").into());
                }
                partials.insert(index, chunk.iter().sum());
                Ok(())
            })
        })
        .collect();

    let mut config = RunConfig::default()
        .with_stop_on_error(cli.stop_on_error)
        .with_thread_name("sum");
    if let Some(workers) = cli.workers {
        config.worker_count = workers;
    }

    let ctx = match cli.timeout_ms {
        Some(ms) => CancellationContext::with_timeout(Duration::from_millis(ms)),
        None => CancellationContext::new(),
    };

    info!(
        upper = cli.upper,
        chunks = tasks.len(),
        workers = config.worker_count,
        "summing"
    );
    let started = Instant::now();

    match run_parallel(&ctx, tasks, &config).await {
        Ok(()) => {
            let total = turul_seq::reduce(&partials.values(), |acc, part| acc + part, 0u64);
            info!(total, elapsed_ms = started.elapsed().as_millis() as u64, "done");
            println!("{total}");
            Ok(())
        }
        Err(err) if err.is_cancellation() => {
            warn!(completed_chunks = partials.len(), "run cancelled");
            Err(err).context("summing did not finish in time")
        }
        Err(err) => Err(err).context("a chunk failed"),
    }
}
