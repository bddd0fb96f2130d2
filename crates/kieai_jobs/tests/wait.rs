//! Polling-loop tests under a paused tokio clock.

mod common;

use common::MockTransport;
use core::time::Duration;
use kieai_core::{ErrorKind, SdkError};
use kieai_jobs::{JobsModule, WaitOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
struct PromptInput {
    prompt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResult {
    result_urls: Vec<String>,
}

const MODEL: &str = "kling/v2-1-standard";

fn record(state: &str) -> Value {
    json!({
        "taskId": "T1",
        "model": MODEL,
        "state": state,
        "param": "{}"
    })
}

fn success_record() -> Value {
    json!({
        "taskId": "T1",
        "model": MODEL,
        "state": "success",
        "param": "{}",
        "resultJson": "{\"resultUrls\":[\"https://x/y.mp4\"]}"
    })
}

fn options() -> WaitOptions {
    WaitOptions {
        max_wait: Duration::from_millis(100),
        poll_interval: Duration::from_millis(10),
    }
}

#[tokio::test(start_paused = true)]
async fn success_after_two_polls_invokes_progress_twice() {
    let transport = MockTransport::new(vec![Ok(record("generating")), Ok(success_record())]);
    let module: JobsModule<PromptInput, VideoResult> = JobsModule::new(transport.clone(), MODEL);

    let mut polls = 0u32;
    let result = module
        .wait_for_completion_with("T1", &options(), |_snapshot| polls += 1)
        .await
        .expect("second poll is terminal success");

    assert_eq!(result.result_urls, vec!["https://x/y.mp4"]);
    assert_eq!(polls, 2);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn never_terminal_times_out_at_the_bound() {
    let transport = MockTransport::repeating(record("generating"));
    let module: JobsModule<PromptInput, VideoResult> = JobsModule::new(transport.clone(), MODEL);

    let started = tokio::time::Instant::now();
    let err = module
        .wait_for_completion("T1", &options())
        .await
        .expect_err("the task never completes");

    assert_eq!(err.kind(), ErrorKind::Timeout);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(100), "gave up too early: {elapsed:?}");
    assert!(elapsed <= Duration::from_millis(110), "gave up too late: {elapsed:?}");

    // The bound is named in the error.
    assert!(err.to_string().contains("100ms"));
}

#[tokio::test(start_paused = true)]
async fn remote_failure_is_distinct_from_timeout() {
    let transport = MockTransport::new(vec![Ok(json!({
        "taskId": "T1",
        "model": MODEL,
        "state": "fail",
        "param": "{}",
        "failCode": 422,
        "failMsg": "flagged prompt"
    }))]);
    let module: JobsModule<PromptInput, VideoResult> = JobsModule::new(transport.clone(), MODEL);

    let err = module
        .wait_for_completion("T1", &options())
        .await
        .expect_err("terminal failure must raise");

    match err {
        SdkError::TaskFailed {
            task_id,
            code,
            message,
        } => {
            assert_eq!(task_id, "T1");
            assert_eq!(code.as_deref(), Some("422"));
            assert_eq!(message.as_deref(), Some("flagged prompt"));
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn skipped_intermediate_states_are_fine() {
    // waiting -> success with queuing and generating never observed.
    let transport = MockTransport::new(vec![Ok(record("waiting")), Ok(success_record())]);
    let module: JobsModule<PromptInput, VideoResult> = JobsModule::new(transport.clone(), MODEL);

    let result = module.wait_for_completion("T1", &options()).await.unwrap();
    assert_eq!(result.result_urls.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn undecodable_success_payload_raises_validation() {
    let transport = MockTransport::new(vec![Ok(json!({
        "taskId": "T1",
        "model": MODEL,
        "state": "success",
        "param": "{}",
        "resultJson": "not valid json"
    }))]);
    let module: JobsModule<PromptInput, VideoResult> = JobsModule::new(transport.clone(), MODEL);

    let err = module
        .wait_for_completion("T1", &options())
        .await
        .expect_err("wait promises a payload");

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test(start_paused = true)]
async fn transport_errors_propagate_unchanged() {
    let transport = MockTransport::new(vec![Err(SdkError::Network {
        method: "GET",
        url: "https://api.kie.ai/api/v1/jobs/recordInfo".into(),
        message: "connection reset".into(),
        source: None,
    })]);
    let module: JobsModule<PromptInput, VideoResult> = JobsModule::new(transport.clone(), MODEL);

    let err = module
        .wait_for_completion("T1", &options())
        .await
        .expect_err("transport failure must propagate");

    assert_eq!(err.kind(), ErrorKind::Network);
}
