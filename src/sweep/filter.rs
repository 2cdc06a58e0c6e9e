//! Status filtering for listed jobs.

use crate::batch::JobSummary;

/// Select the identifiers of jobs that are still cancellable.
///
/// Pure function: keeps input order, does not de-duplicate, and only
/// passes through jobs whose status was cancellable at list time.
#[must_use]
pub fn cancellable_ids(jobs: &[JobSummary]) -> Vec<String> {
    jobs.iter()
        .filter(|job| job.status.is_cancellable())
        .map(|job| job.id.clone())
        .collect()
}
