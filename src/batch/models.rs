//! Batch API request and response models.

use serde::{Deserialize, Serialize};

/// Filter name selecting jobs created at or after a timestamp.
///
/// The value is epoch milliseconds rendered as a decimal string, per the
/// Batch `ListJobs` contract.
pub const AFTER_CREATED_AT: &str = "AFTER_CREATED_AT";

/// Name/values filter pair for `ListJobs`.
#[derive(Debug, Clone, Serialize)]
pub struct JobFilter {
    /// Filter name.
    pub name: String,
    /// Filter values.
    pub values: Vec<String>,
}

impl JobFilter {
    /// Filter selecting jobs created at or after `millis` (inclusive).
    #[must_use]
    pub fn created_after(millis: i64) -> Self {
        Self {
            name: AFTER_CREATED_AT.to_string(),
            values: vec![millis.to_string()],
        }
    }
}

/// `ListJobs` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsRequest {
    /// Job queue name or ARN.
    pub job_queue: String,
    /// Filters applied server-side.
    pub filters: Vec<JobFilter>,
    /// Continuation cursor from the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Maximum results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

/// `ListJobs` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsResponse {
    /// Job summaries on this page.
    #[serde(default)]
    pub job_summary_list: Vec<BatchJobSummary>,
    /// Continuation cursor, absent on the last page.
    pub next_token: Option<String>,
}

/// Job summary as returned by `ListJobs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchJobSummary {
    /// Job ID.
    pub job_id: String,
    /// Job name.
    #[serde(default)]
    pub job_name: String,
    /// Status string (e.g., "RUNNABLE").
    pub status: String,
    /// Creation time as epoch milliseconds.
    pub created_at: Option<i64>,
}

/// `CancelJob` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelJobRequest {
    /// Job ID.
    pub job_id: String,
    /// Human-readable cancellation reason.
    pub reason: String,
}
