//! batch-sweep CLI - bulk-cancel waiting jobs in a Batch job queue.

use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use batch_sweep::config::DEFAULT_CANCEL_REASON;
use batch_sweep::{BatchConnector, Sts, SweepConfig, Sweeper};

/// Bulk-cancel SUBMITTED/PENDING/RUNNABLE jobs in a Batch job queue.
#[derive(Parser)]
#[command(name = "batch-sweep")]
#[command(about = "Bulk-cancel waiting jobs in a Batch job queue")]
struct Cli {
    /// Job queue name or ARN (or set `BATCH_SWEEP_QUEUE` env var).
    #[arg(long, env = "BATCH_SWEEP_QUEUE")]
    job_queue: String,

    /// IAM role ARN to assume (or set `BATCH_SWEEP_ROLE_ARN` env var).
    #[arg(long, env = "BATCH_SWEEP_ROLE_ARN")]
    role_arn: String,

    /// Session name for the assumed role.
    #[arg(long, default_value = "batch-sweep-session")]
    session_name: String,

    /// AWS region (e.g., us-east-1).
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// Only consider jobs created at or after this time (RFC 3339,
    /// e.g., 2023-08-22T00:00:00Z).
    #[arg(long)]
    created_after: DateTime<Utc>,

    /// Number of full sweeps over the queue.
    #[arg(long, default_value = "20000")]
    passes: u32,

    /// Max in-flight cancellation requests (defaults to the host CPU count).
    #[arg(long)]
    concurrency: Option<usize>,

    /// Reason string attached to every cancellation request.
    #[arg(long, default_value = DEFAULT_CANCEL_REASON)]
    reason: String,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let concurrency = cli.concurrency.unwrap_or_else(|| {
        thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    });

    let config = SweepConfig {
        job_queue: cli.job_queue,
        role_arn: cli.role_arn,
        session_name: cli.session_name,
        region: cli.region,
        created_after: cli.created_after,
        passes: cli.passes,
        concurrency,
        reason: cli.reason,
    };
    config.validate().context("Invalid configuration")?;

    let provider = Sts::new().context("Failed to create STS client")?;
    let connector = BatchConnector::new(
        config.region.clone(),
        config.job_queue.clone(),
        config.created_after,
    );

    let sweeper = Sweeper::new(Arc::new(provider), Arc::new(connector), config);
    let report = sweeper.run().await?;

    println!("\nSweep finished:");
    println!("  Passes:             {}", report.passes.len());
    println!("  Pages fetched:      {}", report.total_pages());
    println!("  Cancels attempted:  {}", report.total_attempted());
    println!("  Cancels failed:     {}", report.total_failed());

    Ok(())
}
