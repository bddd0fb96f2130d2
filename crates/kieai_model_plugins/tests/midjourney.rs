//! Midjourney capability tests: the legacy numeric encoding, image-index
//! validation, and the nested task-details payload.

mod common;

use common::MockTransport;
use core::time::Duration;
use kieai_core::{Config, ErrorKind, SdkError};
use kieai_jobs::{GenerationFlag, IntoOutcome, TaskOutcome, WaitOptions};
use kieai_model_plugins::midjourney::{
    self, MidjourneyApi, MidjourneyGenerateOptions, MidjourneyMotion, MidjourneyPlugin,
    MidjourneyTask,
};
use kieai_plugin::KieClient;
use serde_json::{Value, json};
use std::sync::Arc;

fn api_with(transport: Arc<MockTransport>) -> (KieClient, Arc<MidjourneyApi>) {
    let mut client = KieClient::with_transport(Config::new("test-key"), transport).unwrap();
    client.register(MidjourneyPlugin).unwrap();
    let api = client.resolve::<MidjourneyApi>(midjourney::NAME).unwrap();
    (client, api)
}

fn record(flag: u8) -> Value {
    json!({
        "taskId": "M1",
        "taskType": "mj_txt2img",
        "paramJson": "{\"prompt\":\"a fox\"}",
        "successFlag": flag,
        "resultInfoJson": if flag == 1 {
            json!({ "resultUrls": [{ "resultUrl": "https://x/a.png" }] })
        } else {
            Value::Null
        },
        "errorCode": if flag >= 2 { json!(1301) } else { Value::Null },
        "errorMessage": if flag >= 2 { json!("banned prompt") } else { Value::Null },
        "createTime": "2025-08-01 10:00:00"
    })
}

#[tokio::test]
async fn text_to_image_posts_the_task_type() {
    let transport = MockTransport::new(vec![Ok(json!({ "taskId": "M1" }))]);
    let (_client, api) = api_with(transport.clone());

    api.text_to_image(
        "a fox in the snow",
        &MidjourneyGenerateOptions {
            aspect_ratio: Some("16:9".into()),
            stylization: Some(100),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0]["path"], "/api/v1/mj/generate");
    assert_eq!(requests[0]["body"]["taskType"], "mj_txt2img");
    assert_eq!(requests[0]["body"]["prompt"], "a fox in the snow");
    assert_eq!(requests[0]["body"]["aspectRatio"], "16:9");
}

#[tokio::test]
async fn video_wraps_the_single_source_image() {
    let transport = MockTransport::new(vec![Ok(json!({ "taskId": "M2" }))]);
    let (_client, api) = api_with(transport.clone());

    api.video(
        "gentle rain",
        "https://x/still.png",
        MidjourneyMotion::Low,
        &MidjourneyGenerateOptions::default(),
    )
    .await
    .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0]["body"]["taskType"], "mj_video");
    assert_eq!(requests[0]["body"]["fileUrls"], json!(["https://x/still.png"]));
    assert_eq!(requests[0]["body"]["motion"], "low");
}

#[tokio::test]
async fn image_index_bounds_are_enforced() {
    let transport = MockTransport::new(vec![]);
    let (_client, api) = api_with(transport.clone());

    for bad in [0u32, 5] {
        let err = api.upscale("M1", bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = api.vary("M1", bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn task_details_unwraps_the_extra_nesting() {
    let transport = MockTransport::new(vec![Ok(json!({ "data": record(0) }))]);
    let (_client, api) = api_with(transport.clone());

    let task = api.get_task("M1").await.unwrap();
    assert_eq!(task.task_id, "M1");
    assert_eq!(task.success_flag, GenerationFlag::Generating);
    assert_eq!(task.param()["prompt"], "a fox");
}

#[test]
fn both_failure_flags_collapse_into_one_category() {
    for flag in [2u8, 3] {
        let task: MidjourneyTask = serde_json::from_value(record(flag)).unwrap();
        match task.into_outcome().unwrap() {
            TaskOutcome::Failed(failure) => {
                // The server error code wins over the flag code.
                assert_eq!(failure.code.as_deref(), Some("1301"));
                assert_eq!(failure.message.as_deref(), Some("banned prompt"));
            }
            other => panic!("flag {flag} should fail, got {other:?}"),
        }
    }
}

#[test]
fn failure_without_error_code_keeps_the_flag_code() {
    let task: MidjourneyTask = serde_json::from_value(json!({
        "taskId": "M1",
        "successFlag": 3
    }))
    .unwrap();
    match task.into_outcome().unwrap() {
        TaskOutcome::Failed(failure) => {
            assert_eq!(failure.code.as_deref(), Some("3"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn wait_resolves_over_the_numeric_encoding() {
    let transport = MockTransport::new(vec![
        Ok(json!({ "data": record(0) })),
        Ok(json!({ "data": record(1) })),
    ]);
    let (_client, api) = api_with(transport.clone());

    let result = api
        .wait_for_completion(
            "M1",
            &WaitOptions {
                max_wait: Duration::from_millis(100),
                poll_interval: Duration::from_millis(10),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.result_urls[0].result_url, "https://x/a.png");
}

#[tokio::test(start_paused = true)]
async fn wait_surfaces_the_failure_diagnostics() {
    let transport = MockTransport::new(vec![Ok(json!({ "data": record(2) }))]);
    let (_client, api) = api_with(transport.clone());

    let err = api
        .wait_for_completion(
            "M1",
            &WaitOptions {
                max_wait: Duration::from_millis(100),
                poll_interval: Duration::from_millis(10),
            },
        )
        .await
        .unwrap_err();

    match err {
        SdkError::TaskFailed { code, message, .. } => {
            assert_eq!(code.as_deref(), Some("1301"));
            assert_eq!(message.as_deref(), Some("banned prompt"));
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn callback_uses_the_top_level_task_id() {
    let transport = MockTransport::new(vec![]);
    let (_client, api) = api_with(transport.clone());

    let err = api.verify_callback(&json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
