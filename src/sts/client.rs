//! STS API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::models::{AssumeRoleResponse, Credentials};
use super::CredentialProvider;
use crate::error::SweepError;

/// Default STS endpoint (global).
const STS_ENDPOINT: &str = "https://sts.amazonaws.com";

/// STS API version used for `AssumeRole`.
const STS_API_VERSION: &str = "2011-06-15";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// STS credential provider.
///
/// Issues one `AssumeRole` call per [`CredentialProvider::assume_role`]
/// invocation; failures surface to the caller unretried.
#[derive(Clone)]
pub struct Sts {
    /// HTTP client.
    client: Client,
    /// STS endpoint.
    endpoint: String,
}

impl Sts {
    /// Create a new STS client against the global endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, SweepError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(SweepError::Http)?;

        Ok(Self {
            client,
            endpoint: STS_ENDPOINT.to_string(),
        })
    }

    /// Override the STS endpoint (used by tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl CredentialProvider for Sts {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Credentials, SweepError> {
        debug!(role_arn = %role_arn, session_name = %session_name, "Assuming role");

        // Note: In production, use the aws-sigv4 crate for proper request
        // signing with the caller's base credentials.
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .form(&[
                ("Action", "AssumeRole"),
                ("Version", STS_API_VERSION),
                ("RoleArn", role_arn),
                ("RoleSessionName", session_name),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SweepError::Auth(text));
        }
        if !status.is_success() {
            return Err(SweepError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let parsed: AssumeRoleResponse = serde_json::from_str(&text)?;
        let credentials = parsed.assume_role_response.assume_role_result.credentials;

        info!(
            role_arn = %role_arn,
            access_key_id = %credentials.access_key_id,
            "Assumed role"
        );

        Ok(credentials)
    }
}
