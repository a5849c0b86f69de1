//! Integration tests for video generation jobs

use super::*;
use integrations_foundry_media::prelude::*;
use integrations_foundry_media::JobStatus;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JOBS: &str = "/openai/v1/video/generations/jobs";
const JOB_ID: &str = "task_01integration";
const GENERATION_ID: &str = "gen_01integration";
const MP4: &[u8] = b"\x00\x00\x00\x18ftypmp42integration";

async fn mount_happy_path(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(JOBS))
        .and(query_param("api-version", "preview"))
        .and(header("api-key", API_KEY))
        .and(body_json(json!({
            "prompt": "a paper boat in rain",
            "n_variants": "1",
            "n_seconds": "5",
            "height": "1080",
            "width": "1920",
            "model": "sora"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": JOB_ID,
            "status": "queued"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{JOBS}/{JOB_ID}")))
        .respond_with(success_response(json!({
            "id": JOB_ID,
            "status": "processing",
            "generations": []
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{JOBS}/{JOB_ID}")))
        .respond_with(success_response(json!({
            "id": JOB_ID,
            "status": "succeeded",
            "generations": [{ "id": GENERATION_ID }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/openai/v1/video/generations/{GENERATION_ID}/content/video"
        )))
        .and(query_param("api-version", "preview"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(MP4),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn fast_client(server: &MockServer) -> VideoClient {
    VideoClient::new(config_for(server, ServiceKind::Video))
        .unwrap()
        .with_polling(Duration::from_millis(20), Duration::from_secs(10))
}

#[tokio::test]
async fn test_video_generate_integration() {
    let server = setup_mock_server().await;
    mount_happy_path(&server).await;

    let output = fast_client(&server)
        .generate(VideoGenerationRequest::new("a paper boat in rain"))
        .await
        .unwrap();

    assert_eq!(output.bytes().map(|b| b.to_vec()), Some(MP4.to_vec()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_video_generate_blocking_saves_file() {
    let server = setup_mock_server().await;
    mount_happy_path(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("clips/boat.mp4");
    let client = fast_client(&server);
    let request = VideoGenerationRequest::new("a paper boat in rain").with_output_file(&target);

    let output = tokio::task::spawn_blocking(move || client.generate_blocking(request).unwrap())
        .await
        .unwrap();

    assert_eq!(output, ArtifactOutput::Saved(target.clone()));
    assert_eq!(std::fs::read(&target).unwrap(), MP4);
}

#[tokio::test]
async fn test_video_job_failure() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(JOBS))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": JOB_ID})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{JOBS}/{JOB_ID}")))
        .respond_with(success_response(json!({
            "id": JOB_ID,
            "status": "failed",
            "error": { "code": "moderation_blocked", "message": "prompt rejected" }
        })))
        .mount(&server)
        .await;

    let err = fast_client(&server)
        .generate(VideoGenerationRequest::new("x"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("prompt rejected"));
}

#[tokio::test]
async fn test_video_create_401() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(JOBS))
        .respond_with(error_response(
            401,
            json!({"error": {"code": "401", "message": "Access denied"}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(&server)
        .generate(VideoGenerationRequest::new("x"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(err.is_authentication_error());
}

#[tokio::test]
async fn test_get_job_integration() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(format!("{JOBS}/{JOB_ID}")))
        .respond_with(success_response(json!({"id": JOB_ID, "status": "running"})))
        .mount(&server)
        .await;

    let job = fast_client(&server).get_job(JOB_ID).await.unwrap();
    assert_eq!(job.status, Some(JobStatus::Running));
}
