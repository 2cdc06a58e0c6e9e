//! Bulk cancellation sweeper for AWS Batch job queues.
//!
//! Repeatedly sweeps a Batch job queue and cancels every job that is still
//! waiting to run:
//!
//! 1. Assume an execution role to get fresh temporary credentials.
//! 2. Page through `ListJobs` with a fixed `AFTER_CREATED_AT` filter.
//! 3. Keep only jobs whose status is SUBMITTED, PENDING or RUNNABLE.
//! 4. Fan cancellation requests out across a bounded set of workers.
//!
//! The whole sweep runs for a fixed number of passes so that jobs submitted
//! between passes are still caught. Individual cancellation failures are
//! logged and counted but never retried; listing and authentication failures
//! abort the run.

pub mod batch;
pub mod config;
pub mod error;
pub mod sts;
pub mod sweep;

pub use batch::{BatchClient, BatchConnector, JobPage, JobQueue, JobStatus, JobSummary};
pub use config::SweepConfig;
pub use error::SweepError;
pub use sts::{CredentialProvider, Credentials, Sts};
pub use sweep::{DispatchStats, PassStats, QueueFactory, SweepReport, Sweeper};
