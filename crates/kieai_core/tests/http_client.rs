//! End-to-end tests for the reqwest transport against a local mock server.

use core::time::Duration;
use kieai_core::{Config, ErrorKind, HttpClient, RetryPolicy, Transport};
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> HttpClient {
    let config = Config::new("test-key")
        .with_base_url(server.url())
        .with_retry(RetryPolicy::none())
        .normalize()
        .expect("config should normalize");
    HttpClient::new(config)
}

#[tokio::test]
async fn get_unwraps_envelope_and_sends_bearer_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/jobs/recordInfo")
        .match_query(mockito::Matcher::UrlEncoded("taskId".into(), "T1".into()))
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(
            json!({
                "code": 200,
                "msg": "success",
                "data": { "taskId": "T1", "state": "generating" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let data = client
        .get("/api/v1/jobs/recordInfo", &[("taskId", "T1".to_string())])
        .await
        .expect("request should succeed");

    assert_eq!(data["taskId"], "T1");
    assert_eq!(data["state"], "generating");
    mock.assert_async().await;
}

#[tokio::test]
async fn post_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/jobs/createTask")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(json!({
            "model": "kling/v2-1-standard",
            "input": { "prompt": "a cat" }
        })))
        .with_status(200)
        .with_body(json!({ "code": 200, "msg": "", "data": { "taskId": "T9" } }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let data = client
        .post(
            "/api/v1/jobs/createTask",
            json!({ "model": "kling/v2-1-standard", "input": { "prompt": "a cat" } }),
        )
        .await
        .expect("request should succeed");

    assert_eq!(data["taskId"], "T9");
    mock.assert_async().await;
}

#[tokio::test]
async fn business_code_failure_becomes_http_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/jobs/recordInfo")
        .with_status(200)
        .with_body(json!({ "code": 402, "msg": "insufficient credits" }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .get("/api/v1/jobs/recordInfo", &[])
        .await
        .expect_err("non-200 envelope must fail");

    assert_eq!(err.kind(), ErrorKind::HttpFailure);
    let text = err.to_string();
    assert!(text.contains("402"));
    assert!(text.contains("insufficient credits"));
}

#[tokio::test]
async fn http_error_status_becomes_http_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v1/jobs/createTask")
        .with_status(401)
        .with_body(json!({ "code": 401, "msg": "invalid api key" }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .post("/api/v1/jobs/createTask", json!({}))
        .await
        .expect_err("401 must fail");

    assert_eq!(err.kind(), ErrorKind::HttpFailure);
    assert!(err.is_network_error());
    assert!(err.to_string().contains("invalid api key"));
}

#[tokio::test]
async fn non_json_body_becomes_network_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/jobs/recordInfo")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .get("/api/v1/jobs/recordInfo", &[])
        .await
        .expect_err("unparseable body must fail");

    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn get_is_retried_on_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/jobs/recordInfo")
        .with_status(502)
        .with_body(json!({ "code": 502, "msg": "bad gateway" }).to_string())
        .expect(3)
        .create_async()
        .await;

    let config = Config::new("test-key")
        .with_base_url(server.url())
        .with_retry(RetryPolicy {
            max_retries: 2,
            retry_delay: Duration::from_millis(1),
            exponential_backoff: false,
        })
        .normalize()
        .unwrap();
    let client = HttpClient::new(config);

    let err = client
        .get("/api/v1/jobs/recordInfo", &[])
        .await
        .expect_err("all attempts exhausted");

    assert_eq!(err.kind(), ErrorKind::HttpFailure);
    // Initial attempt plus two retries.
    mock.assert_async().await;
}

#[tokio::test]
async fn post_is_never_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/jobs/createTask")
        .with_status(502)
        .with_body(json!({ "code": 502, "msg": "bad gateway" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let config = Config::new("test-key")
        .with_base_url(server.url())
        .with_retry(RetryPolicy {
            max_retries: 5,
            retry_delay: Duration::from_millis(1),
            exponential_backoff: false,
        })
        .normalize()
        .unwrap();
    let client = HttpClient::new(config);

    let err = client
        .post("/api/v1/jobs/createTask", json!({ "model": "x", "input": {} }))
        .await
        .expect_err("POST must fail without retrying");

    assert_eq!(err.kind(), ErrorKind::HttpFailure);
    mock.assert_async().await;
}
