//! Veo3 capability tests: option combinations, state normalization, and
//! the top-level callback envelope.

mod common;

use common::MockTransport;
use core::time::Duration;
use kieai_core::{Config, ErrorKind, SdkError};
use kieai_jobs::WaitOptions;
use kieai_model_plugins::veo3::{self, Veo3Api, Veo3GenerateOptions, Veo3Plugin, Veo3Quality};
use kieai_plugin::KieClient;
use serde_json::json;
use std::sync::Arc;

fn api_with(transport: Arc<MockTransport>) -> (KieClient, Arc<Veo3Api>) {
    let mut client = KieClient::with_transport(Config::new("test-key"), transport).unwrap();
    client.register(Veo3Plugin).unwrap();
    let api = client.resolve::<Veo3Api>(veo3::NAME).unwrap();
    (client, api)
}

#[tokio::test]
async fn text_to_video_requires_a_prompt() {
    let transport = MockTransport::new(vec![]);
    let (_client, api) = api_with(transport.clone());

    let err = api
        .text_to_video(&Veo3GenerateOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn full_hd_is_limited_to_five_seconds() {
    let transport = MockTransport::new(vec![]);
    let (_client, api) = api_with(transport.clone());

    let err = api
        .text_to_video(&Veo3GenerateOptions {
            prompt: "clouds parting over a runway".into(),
            quality: Some(Veo3Quality::FullHd),
            duration: Some(10),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn image_to_video_requires_input_images() {
    let transport = MockTransport::new(vec![]);
    let (_client, api) = api_with(transport.clone());

    let err = api
        .image_to_video(&Veo3GenerateOptions {
            prompt: "animate the scene".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn generate_posts_camel_case_fields() {
    let transport = MockTransport::new(vec![Ok(json!({ "taskId": "V1" }))]);
    let (_client, api) = api_with(transport.clone());

    api.image_to_video(&Veo3GenerateOptions {
        prompt: "animate the scene".into(),
        image_urls: Some(vec!["https://example.com/frame.png".into()]),
        duration: Some(5),
        ..Default::default()
    })
    .await
    .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0]["path"], "/api/v1/veo/generate");
    assert_eq!(
        requests[0]["body"]["imageUrls"][0],
        "https://example.com/frame.png"
    );
    assert_eq!(requests[0]["body"]["duration"], 5);
}

#[tokio::test(start_paused = true)]
async fn veo3_states_normalize_through_the_wait_loop() {
    // Veo3 spells its pre-terminal states differently; the loop only sees
    // the normalized outcome.
    let transport = MockTransport::new(vec![
        Ok(json!({ "taskId": "V1", "state": "wait" })),
        Ok(json!({ "taskId": "V1", "state": "queueing" })),
        Ok(json!({
            "taskId": "V1",
            "state": "success",
            "videoInfo": {
                "videoId": "vid-1",
                "videoUrl": "https://x/v.mp4",
                "imageUrl": "https://x/v.jpg"
            }
        })),
    ]);
    let (_client, api) = api_with(transport.clone());

    let info = api
        .wait_for_completion(
            "V1",
            &WaitOptions {
                max_wait: Duration::from_millis(100),
                poll_interval: Duration::from_millis(10),
            },
        )
        .await
        .unwrap();

    assert_eq!(info.video_url, "https://x/v.mp4");
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn veo3_failure_carries_the_fail_message() {
    let transport = MockTransport::new(vec![Ok(json!({
        "taskId": "V1",
        "state": "fail",
        "failMsg": "quota exhausted"
    }))]);
    let (_client, api) = api_with(transport.clone());

    let err = api
        .wait_for_completion(
            "V1",
            &WaitOptions {
                max_wait: Duration::from_millis(100),
                poll_interval: Duration::from_millis(10),
            },
        )
        .await
        .unwrap_err();

    match err {
        SdkError::TaskFailed { message, code, .. } => {
            assert_eq!(message.as_deref(), Some("quota exhausted"));
            assert_eq!(code, None);
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn callback_uses_the_top_level_task_id() {
    let transport = MockTransport::new(vec![Ok(json!({
        "taskId": "V1",
        "state": "generating"
    }))]);
    let (_client, api) = api_with(transport.clone());

    // The jobs-style nested envelope is not accepted here.
    let err = api
        .verify_callback(&json!({ "data": { "taskId": "V1" } }))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let task = api
        .verify_callback(&json!({ "taskId": "V1", "code": 200 }))
        .await
        .unwrap();
    assert_eq!(task.task_id, "V1");
}

#[tokio::test]
async fn hd_rendition_is_fetched_by_task_id() {
    let transport = MockTransport::new(vec![Ok(json!({
        "resultUrl": "https://x/v-1080p.mp4"
    }))]);
    let (_client, api) = api_with(transport.clone());

    let video = api.get_1080p_video("V1").await.unwrap();
    assert_eq!(video.result_url.as_deref(), Some("https://x/v-1080p.mp4"));

    let requests = transport.requests();
    assert_eq!(requests[0]["path"], "/api/v1/veo/get-1080p-video");
}
