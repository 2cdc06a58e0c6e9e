//! Run configuration for the sweeper.

use chrono::{DateTime, Utc};

use crate::error::SweepError;

/// Default reason attached to every cancellation request.
pub const DEFAULT_CANCEL_REASON: &str = "Cancelling job.";

/// Configuration for one sweeper run.
///
/// All values are plain scalars supplied at startup; nothing here changes
/// while the run is in flight. In particular `created_after` is computed
/// once, so the "created at or after" window never drifts between passes.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Batch job queue name or ARN.
    pub job_queue: String,
    /// IAM role to assume for queue access.
    pub role_arn: String,
    /// Session name used when assuming the role.
    pub session_name: String,
    /// AWS region (e.g., "us-east-1").
    pub region: String,
    /// Inclusive lower bound on job creation time.
    pub created_after: DateTime<Utc>,
    /// Number of full pagination passes over the queue.
    pub passes: u32,
    /// Maximum number of in-flight cancellation requests.
    pub concurrency: usize,
    /// Human-readable reason attached to each cancellation.
    pub reason: String,
}

impl SweepConfig {
    /// The creation-time lower bound as epoch milliseconds, the unit the
    /// Batch `AFTER_CREATED_AT` filter expects.
    #[must_use]
    pub fn created_after_millis(&self) -> i64 {
        self.created_after.timestamp_millis()
    }

    /// Check the configuration for values that would make a run a no-op
    /// or stall it entirely.
    ///
    /// # Errors
    /// Returns [`SweepError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.job_queue.is_empty() {
            return Err(SweepError::Config("job queue is required".to_string()));
        }
        if self.role_arn.is_empty() {
            return Err(SweepError::Config("role ARN is required".to_string()));
        }
        if self.passes == 0 {
            return Err(SweepError::Config(
                "pass count must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(SweepError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_config() -> SweepConfig {
        SweepConfig {
            job_queue: "training-queue".to_string(),
            role_arn: "arn:aws:iam::123456789012:role/batch-service".to_string(),
            session_name: "sweep-session".to_string(),
            region: "us-east-1".to_string(),
            created_after: Utc.with_ymd_and_hms(2023, 8, 22, 0, 0, 0).unwrap(),
            passes: 3,
            concurrency: 4,
            reason: DEFAULT_CANCEL_REASON.to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_created_after_millis() {
        // 2023-08-22T00:00:00Z
        assert_eq!(valid_config().created_after_millis(), 1_692_662_400_000);
    }

    #[test]
    fn test_rejects_empty_queue() {
        let mut config = valid_config();
        config.job_queue = String::new();
        assert!(matches!(config.validate(), Err(SweepError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_passes() {
        let mut config = valid_config();
        config.passes = 0;
        assert!(matches!(config.validate(), Err(SweepError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = valid_config();
        config.concurrency = 0;
        assert!(matches!(config.validate(), Err(SweepError::Config(_))));
    }
}
