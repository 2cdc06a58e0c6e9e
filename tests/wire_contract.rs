//! Wire-level tests for the Batch and STS clients.
//!
//! These pin the request/response shapes against a mock HTTP server, since
//! the JSON field names and filter semantics are the compatibility surface.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use batch_sweep::sts::CredentialProvider;
use batch_sweep::{BatchClient, Credentials, JobQueue, JobStatus, Sts, SweepError};

fn credentials() -> Credentials {
    Credentials {
        access_key_id: "ASIAEXAMPLE".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: "session-token".to_string(),
        expiration: None,
    }
}

fn client(server: &MockServer) -> BatchClient {
    BatchClient::new(
        credentials(),
        "us-east-1",
        "training-queue",
        Utc.with_ymd_and_hms(2023, 8, 22, 0, 0, 0).unwrap(),
    )
    .unwrap()
    .with_endpoint(server.uri())
}

#[tokio::test]
async fn list_jobs_sends_queue_and_time_filter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .and(body_partial_json(json!({
            "jobQueue": "training-queue",
            "filters": [
                {"name": "AFTER_CREATED_AT", "values": ["1692662400000"]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobSummaryList": [
                {"jobId": "a1", "jobName": "train-0", "status": "RUNNABLE", "createdAt": 1_692_662_400_123_i64},
                {"jobId": "a2", "jobName": "train-1", "status": "RUNNING"}
            ],
            "nextToken": "cursor-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).list_jobs(None).await.unwrap();

    assert_eq!(page.jobs.len(), 2);
    assert_eq!(page.jobs[0].id, "a1");
    assert_eq!(page.jobs[0].status, JobStatus::Runnable);
    assert_eq!(page.jobs[1].status, JobStatus::Running);
    assert_eq!(page.next_token.as_deref(), Some("cursor-1"));
}

#[tokio::test]
async fn list_jobs_forwards_the_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .and(body_partial_json(json!({"nextToken": "cursor-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobSummaryList": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).list_jobs(Some("cursor-1")).await.unwrap();

    assert!(page.jobs.is_empty());
    assert!(page.next_token.is_none());
}

#[tokio::test]
async fn cancel_job_sends_id_and_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/canceljob"))
        .and(body_partial_json(json!({
            "jobId": "a1",
            "reason": "Cancelling job."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .cancel_job("a1", "Cancelling job.")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_errors_carry_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/canceljob"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("ClientException: job is terminal"),
        )
        .mount(&server)
        .await;

    let result = client(&server).cancel_job("gone", "Cancelling job.").await;

    match result {
        Err(SweepError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("terminal"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(403).set_body_string("AccessDeniedException"))
        .mount(&server)
        .await;

    let result = client(&server).list_jobs(None).await;
    assert!(matches!(result, Err(SweepError::Auth(_))));
}

#[tokio::test]
async fn assume_role_parses_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("Action=AssumeRole"))
        .and(body_string_contains("RoleSessionName=sweep-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AssumeRoleResponse": {
                "AssumeRoleResult": {
                    "Credentials": {
                        "AccessKeyId": "ASIAEXAMPLE",
                        "SecretAccessKey": "secret",
                        "SessionToken": "session-token",
                        "Expiration": 1_692_666_000.0
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sts = Sts::new().unwrap().with_endpoint(server.uri());
    let creds = sts
        .assume_role(
            "arn:aws:iam::123456789012:role/batch-service",
            "sweep-session",
        )
        .await
        .unwrap();

    assert_eq!(creds.access_key_id, "ASIAEXAMPLE");
    assert_eq!(creds.session_token, "session-token");
}

#[tokio::test]
async fn assume_role_denied_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("AccessDenied"))
        .mount(&server)
        .await;

    let sts = Sts::new().unwrap().with_endpoint(server.uri());
    let result = sts
        .assume_role("arn:aws:iam::123456789012:role/other", "sweep-session")
        .await;

    assert!(matches!(result, Err(SweepError::Auth(_))));
}
