//! Batch API client implementation.
//!
//! This client uses AWS SDK-style requests authenticated with the session
//! token from an assumed role.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::models::{
    BatchJobSummary, CancelJobRequest, JobFilter, ListJobsRequest, ListJobsResponse,
};
use super::{JobPage, JobQueue, JobStatus, JobSummary};
use crate::error::SweepError;
use crate::sts::Credentials;
use crate::sweep::QueueFactory;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Batch job queue client bound to one queue and one time window.
#[derive(Clone)]
pub struct BatchClient {
    /// HTTP client.
    client: Client,
    /// Batch API endpoint.
    endpoint: String,
    /// Session credentials from the assumed role.
    credentials: Credentials,
    /// Job queue name or ARN.
    job_queue: String,
    /// Inclusive creation-time lower bound, epoch milliseconds.
    created_after_ms: i64,
}

impl BatchClient {
    /// Create a new client for one queue in one region.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        credentials: Credentials,
        region: impl Into<String>,
        job_queue: impl Into<String>,
        created_after: DateTime<Utc>,
    ) -> Result<Self, SweepError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(SweepError::Http)?;

        Ok(Self {
            client,
            endpoint: format!("https://batch.{}.amazonaws.com", region.into()),
            credentials,
            job_queue: job_queue.into(),
            created_after_ms: created_after.timestamp_millis(),
        })
    }

    /// Override the Batch endpoint (used by tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Execute a Batch API request.
    /// Note: In production, use the aws-sigv4 crate for proper request signing.
    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, SweepError> {
        let url = format!("{}{path}", self.endpoint);
        debug!(url = %url, "Batch request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header(
                "X-Amz-Date",
                chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string(),
            )
            .header("X-Amz-Security-Token", &self.credentials.session_token)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, SweepError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                SweepError::Serialization(e)
            })
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(SweepError::Auth(text))
        } else {
            Err(SweepError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Convert a wire job summary to our type.
    fn to_summary(job: &BatchJobSummary) -> JobSummary {
        let status = match job.status.as_str() {
            "SUBMITTED" => JobStatus::Submitted,
            "PENDING" => JobStatus::Pending,
            "RUNNABLE" => JobStatus::Runnable,
            "STARTING" => JobStatus::Starting,
            "RUNNING" => JobStatus::Running,
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            _ => JobStatus::Unknown,
        };

        JobSummary {
            id: job.job_id.clone(),
            name: job.job_name.clone(),
            status,
            created_at: job.created_at.and_then(DateTime::from_timestamp_millis),
        }
    }
}

#[async_trait]
impl JobQueue for BatchClient {
    async fn list_jobs(&self, cursor: Option<&str>) -> Result<JobPage, SweepError> {
        let body = ListJobsRequest {
            job_queue: self.job_queue.clone(),
            filters: vec![JobFilter::created_after(self.created_after_ms)],
            next_token: cursor.map(ToString::to_string),
            max_results: None,
        };

        let response: ListJobsResponse = self.post("/v1/listjobs", &body).await?;

        debug!(
            job_queue = %self.job_queue,
            jobs = response.job_summary_list.len(),
            has_next = response.next_token.is_some(),
            "Listed jobs"
        );

        Ok(JobPage {
            jobs: response.job_summary_list.iter().map(Self::to_summary).collect(),
            next_token: response.next_token,
        })
    }

    async fn cancel_job(&self, job_id: &str, reason: &str) -> Result<(), SweepError> {
        let body = CancelJobRequest {
            job_id: job_id.to_string(),
            reason: reason.to_string(),
        };

        self.post::<serde_json::Value>("/v1/canceljob", &body)
            .await?;

        debug!(job_id = %job_id, "Cancellation requested");
        Ok(())
    }
}

/// Builds an authenticated [`BatchClient`] for each sweep pass.
///
/// The queue identifier and creation-time bound are captured once at
/// construction, so every pass sees the same window.
#[derive(Debug, Clone)]
pub struct BatchConnector {
    /// AWS region.
    region: String,
    /// Job queue name or ARN.
    job_queue: String,
    /// Inclusive creation-time lower bound.
    created_after: DateTime<Utc>,
}

impl BatchConnector {
    /// Create a connector for one queue in one region.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        job_queue: impl Into<String>,
        created_after: DateTime<Utc>,
    ) -> Self {
        Self {
            region: region.into(),
            job_queue: job_queue.into(),
            created_after,
        }
    }
}

#[async_trait]
impl QueueFactory for BatchConnector {
    async fn connect(&self, credentials: Credentials) -> Result<Arc<dyn JobQueue>, SweepError> {
        let client = BatchClient::new(
            credentials,
            self.region.clone(),
            self.job_queue.clone(),
            self.created_after,
        )?;
        Ok(Arc::new(client))
    }
}
