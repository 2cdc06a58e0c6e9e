//! STS request and response models.

use serde::Deserialize;

/// Temporary credentials returned by `AssumeRole`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Access key ID.
    #[serde(rename = "AccessKeyId")]
    pub access_key_id: String,
    /// Secret access key.
    #[serde(rename = "SecretAccessKey")]
    pub secret_access_key: String,
    /// Session token.
    #[serde(rename = "SessionToken")]
    pub session_token: String,
    /// Expiration as epoch seconds.
    #[serde(rename = "Expiration")]
    pub expiration: Option<f64>,
}

/// Top-level `AssumeRole` response envelope.
#[derive(Debug, Deserialize)]
pub struct AssumeRoleResponse {
    /// Response body.
    #[serde(rename = "AssumeRoleResponse")]
    pub assume_role_response: AssumeRoleBody,
}

/// `AssumeRole` response body.
#[derive(Debug, Deserialize)]
pub struct AssumeRoleBody {
    /// Result payload.
    #[serde(rename = "AssumeRoleResult")]
    pub assume_role_result: AssumeRoleResult,
}

/// `AssumeRole` result payload.
#[derive(Debug, Deserialize)]
pub struct AssumeRoleResult {
    /// Issued credentials.
    #[serde(rename = "Credentials")]
    pub credentials: Credentials,
}
