//! AWS Batch job queue client.
//!
//! Implements the [`JobQueue`] trait over the Batch REST API:
//!
//! - **`ListJobs`** - paginated listing with an `AFTER_CREATED_AT` filter
//! - **`CancelJob`** - per-job cancellation with a reason string

mod client;
mod models;

pub use client::{BatchClient, BatchConnector};
pub use models::{CancelJobRequest, JobFilter, ListJobsRequest, ListJobsResponse};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SweepError;

/// Status of a job as reported by the remote queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Accepted into the queue, not yet evaluated.
    Submitted,
    /// Waiting on dependencies.
    Pending,
    /// Ready to be scheduled onto compute.
    Runnable,
    /// Compute resources are being prepared.
    Starting,
    /// Executing.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with a failure.
    Failed,
    /// Status string not recognized.
    Unknown,
}

impl JobStatus {
    /// Whether a cancellation request is meaningful for this status.
    ///
    /// Jobs that already reached STARTING or later can no longer be
    /// cancelled through `CancelJob`.
    #[must_use]
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Submitted | Self::Pending | Self::Runnable)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Runnable => write!(f, "RUNNABLE"),
            Self::Starting => write!(f, "STARTING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Snapshot of one job as returned by the queue at list time.
#[derive(Debug, Clone)]
pub struct JobSummary {
    /// Job identifier.
    pub id: String,
    /// Job name.
    pub name: String,
    /// Status at list time.
    pub status: JobStatus,
    /// When the job was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of job summaries plus the continuation cursor, if any.
#[derive(Debug, Clone, Default)]
pub struct JobPage {
    /// Jobs on this page, in the order the service returned them.
    pub jobs: Vec<JobSummary>,
    /// Cursor for the next page; `None` when pagination is exhausted.
    pub next_token: Option<String>,
}

/// Trait for a remote batch job queue.
///
/// The queue identifier and creation-time filter are fixed per client, so
/// every call sees the same window.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Fetch one page of job summaries.
    ///
    /// With no cursor, lists from the head of the queue; with a cursor,
    /// continues from where the previous page left off.
    async fn list_jobs(&self, cursor: Option<&str>) -> Result<JobPage, SweepError>;

    /// Request cancellation of a single job.
    async fn cancel_job(&self, job_id: &str, reason: &str) -> Result<(), SweepError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellable_statuses() {
        assert!(JobStatus::Submitted.is_cancellable());
        assert!(JobStatus::Pending.is_cancellable());
        assert!(JobStatus::Runnable.is_cancellable());

        assert!(!JobStatus::Starting.is_cancellable());
        assert!(!JobStatus::Running.is_cancellable());
        assert!(!JobStatus::Succeeded.is_cancellable());
        assert!(!JobStatus::Failed.is_cancellable());
        assert!(!JobStatus::Unknown.is_cancellable());
    }

    #[test]
    fn test_status_display_matches_api_values() {
        assert_eq!(JobStatus::Submitted.to_string(), "SUBMITTED");
        assert_eq!(JobStatus::Runnable.to_string(), "RUNNABLE");
        assert_eq!(JobStatus::Failed.to_string(), "FAILED");
    }
}
