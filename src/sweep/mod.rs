//! The sweep loop: pagination, filtering and concurrent cancellation.
//!
//! One *pass* pages through the whole queue, filtering each page down to
//! its cancellable jobs and dispatching cancellation requests before
//! following the cursor. The [`Sweeper`] re-runs that pass a fixed number
//! of times with freshly assumed credentials, because new jobs may land in
//! the queue between passes.

pub mod filter;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::batch::JobQueue;
use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::sts::{CredentialProvider, Credentials};

/// Builds an authenticated [`JobQueue`] handle from freshly issued
/// credentials, once per pass.
#[async_trait]
pub trait QueueFactory: Send + Sync {
    /// Connect to the queue with the given credentials.
    async fn connect(&self, credentials: Credentials) -> Result<Arc<dyn JobQueue>, SweepError>;
}

/// Outcome of one dispatch batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Cancellation requests attempted.
    pub attempted: usize,
    /// Requests that came back with an error.
    pub failed: usize,
}

/// Counters for one full pagination pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Pages fetched.
    pub pages: usize,
    /// Jobs listed across all pages.
    pub listed: usize,
    /// Cancellation requests attempted.
    pub attempted: usize,
    /// Cancellation requests that failed.
    pub failed: usize,
}

/// Aggregated counters for a whole run.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Per-pass counters, in pass order.
    pub passes: Vec<PassStats>,
}

impl SweepReport {
    /// Total cancellation requests attempted across all passes.
    #[must_use]
    pub fn total_attempted(&self) -> usize {
        self.passes.iter().map(|p| p.attempted).sum()
    }

    /// Total cancellation requests that failed across all passes.
    #[must_use]
    pub fn total_failed(&self) -> usize {
        self.passes.iter().map(|p| p.failed).sum()
    }

    /// Total pages fetched across all passes.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.passes.iter().map(|p| p.pages).sum()
    }
}

/// Runs repeated cancellation sweeps over one job queue.
pub struct Sweeper {
    provider: Arc<dyn CredentialProvider>,
    factory: Arc<dyn QueueFactory>,
    config: SweepConfig,
}

impl Sweeper {
    /// Create a sweeper from its collaborators and run configuration.
    #[must_use]
    pub fn new(
        provider: Arc<dyn CredentialProvider>,
        factory: Arc<dyn QueueFactory>,
        config: SweepConfig,
    ) -> Self {
        Self {
            provider,
            factory,
            config,
        }
    }

    /// Run the configured number of passes.
    ///
    /// Each pass assumes the role again and restarts pagination from the
    /// head of the queue. The pass count is fixed: there is no "no more
    /// work" detection, so the run cost is bounded by configuration alone.
    ///
    /// # Errors
    /// Propagates authentication and listing failures; individual
    /// cancellation failures are only counted.
    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        self.config.validate()?;

        // One limiter for the whole run; work is submitted per page.
        let limiter = Arc::new(Semaphore::new(self.config.concurrency));
        let mut report = SweepReport::default();

        for pass in 0..self.config.passes {
            info!(pass, total = self.config.passes, "Starting sweep pass");

            let credentials = self
                .provider
                .assume_role(&self.config.role_arn, &self.config.session_name)
                .await?;
            let queue = self.factory.connect(credentials).await?;

            let stats = self.run_pass(&queue, &limiter).await?;
            info!(
                pass,
                pages = stats.pages,
                listed = stats.listed,
                attempted = stats.attempted,
                failed = stats.failed,
                "Sweep pass finished"
            );
            report.passes.push(stats);
        }

        Ok(report)
    }

    /// One full pagination pass: list, filter and dispatch every page
    /// until the cursor is exhausted.
    async fn run_pass(
        &self,
        queue: &Arc<dyn JobQueue>,
        limiter: &Arc<Semaphore>,
    ) -> Result<PassStats, SweepError> {
        let mut stats = PassStats::default();
        let mut cursor: Option<String> = None;

        loop {
            let page = queue.list_jobs(cursor.as_deref()).await?;
            stats.pages += 1;
            stats.listed += page.jobs.len();

            // Every page is filtered and dispatched before the cursor
            // check, so its cancellable jobs go out exactly once.
            let ids = filter::cancellable_ids(&page.jobs);
            debug!(
                page = stats.pages,
                listed = page.jobs.len(),
                cancellable = ids.len(),
                "Fetched page"
            );

            let outcome = Self::dispatch(queue, limiter, ids, &self.config.reason).await;
            stats.attempted += outcome.attempted;
            stats.failed += outcome.failed;

            match page.next_token {
                Some(token) => cursor = Some(token),
                None => break,
            }
        }

        Ok(stats)
    }

    /// Fan cancellation requests out across the bounded worker set and
    /// wait until every one has been attempted.
    ///
    /// Requests are independent and unordered; a failed request is logged
    /// and counted but never blocks or cancels the others.
    async fn dispatch(
        queue: &Arc<dyn JobQueue>,
        limiter: &Arc<Semaphore>,
        ids: Vec<String>,
        reason: &str,
    ) -> DispatchStats {
        let mut set = JoinSet::new();

        for id in ids {
            let queue = Arc::clone(queue);
            let limiter = Arc::clone(limiter);
            let reason = reason.to_string();

            set.spawn(async move {
                // The semaphore lives for the whole run and is never closed.
                let Ok(_permit) = limiter.acquire_owned().await else {
                    return false;
                };
                match queue.cancel_job(&id, &reason).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(job_id = %id, error = %e, "Cancellation request failed");
                        false
                    }
                }
            });
        }

        let mut stats = DispatchStats::default();
        while let Some(result) = set.join_next().await {
            stats.attempted += 1;
            match result {
                Ok(true) => {}
                Ok(false) => stats.failed += 1,
                Err(e) => {
                    warn!(error = %e, "Cancellation task panicked");
                    stats.failed += 1;
                }
            }
        }

        stats
    }
}
