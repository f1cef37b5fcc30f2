//! API client tests against a mock backend.

use wiremock::matchers::{body_json_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vgen_client::{ApiClient, ApiConfig, ClientError};
use vgen_models::{CreateJobRequest, JobId, JobStatus};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    })
    .expect("Failed to create API client")
}

fn create_request() -> CreateJobRequest {
    CreateJobRequest {
        prompt: "cat on a skateboard".to_string(),
        width: 854,
        height: 480,
        n_seconds: 5,
    }
}

#[tokio::test]
async fn test_create_job_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json_string(
            r#"{"prompt":"cat on a skateboard","width":854,"height":480,"n_seconds":5}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"id":"job-1"}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .create_job(&create_request())
        .await
        .expect("create_job failed");

    assert_eq!(response.id.as_deref(), Some("job-1"));
}

#[tokio::test]
async fn test_create_job_surfaces_server_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(r#"{"detail":"provider quota exhausted"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_job(&create_request())
        .await
        .expect_err("expected an error");

    match &err {
        ClientError::Status { status, .. } => assert_eq!(*status, 500),
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert_eq!(err.server_message(), "provider quota exhausted");
}

#[tokio::test]
async fn test_job_status_decodes_update() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/job/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"processing","progress":30,"openai_status":"running"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let update = client_for(&server)
        .job_status(&JobId::from_string("job-1"))
        .await
        .expect("job_status failed");

    assert_eq!(update.status, Some(JobStatus::Processing));
    assert_eq!(update.progress, Some(30));
    assert_eq!(update.provider_status.as_deref(), Some("running"));
}

#[tokio::test]
async fn test_job_status_appends_cache_buster() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/job/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{}"#, "application/json"))
        .mount(&server)
        .await;

    client_for(&server)
        .job_status(&JobId::from_string("job-1"))
        .await
        .expect("job_status failed");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.contains("_ts="), "missing cache buster in query: {query}");
}

#[tokio::test]
async fn test_job_status_classifies_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/job/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .job_status(&JobId::from_string("missing"))
        .await
        .expect_err("expected an error");

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_undecodable_body_is_a_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/job/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .job_status(&JobId::from_string("job-1"))
        .await
        .expect_err("expected an error");

    assert!(matches!(err, ClientError::Json(_)));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Unroutable port: nothing listens on it once the mock server is gone.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(ApiConfig {
        base_url: uri,
        ..Default::default()
    })
    .expect("Failed to create API client");

    let err = client
        .job_status(&JobId::from_string("job-1"))
        .await
        .expect_err("expected an error");

    assert!(matches!(err, ClientError::Network(_)));
    assert!(!err.is_not_found());
}
