//! Temporary credential acquisition via STS role assumption.
//!
//! Every sweep pass starts from a fresh [`Credentials`] bundle so that a
//! long run never outlives a session token.

mod client;
mod models;

pub use client::Sts;
pub use models::Credentials;

use async_trait::async_trait;

use crate::error::SweepError;

/// Source of temporary, role-scoped credentials.
///
/// Implementations perform a single role-assumption call per invocation and
/// surface failures to the caller; no retry happens at this layer.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Exchange a role identity for short-lived credentials.
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Credentials, SweepError>;
}
