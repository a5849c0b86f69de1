//! Integration tests for image generation and editing

use super::*;
use integrations_foundry_media::prelude::*;
use integrations_foundry_media::{ImageModel, ImageQuality, ImageSize};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const GENERATIONS: &str = "/openai/deployments/gpt-image-1/images/generations";
const EDITS: &str = "/openai/deployments/gpt-image-1/images/edits";

#[tokio::test]
async fn test_generate_integration_success() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(GENERATIONS))
        .and(query_param("api-version", "2025-04-01-preview"))
        .and(header("api-key", API_KEY))
        .and(body_json(json!({
            "prompt": "A watercolor fox",
            "size": "1536x1024",
            "quality": "high",
            "n": 1
        })))
        .respond_with(success_response(image_envelope(PNG_BYTES)))
        .expect(1)
        .mount(&server)
        .await;

    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();
    let output = client
        .generate(
            ImageGenerationRequest::new("A watercolor fox")
                .with_size(ImageSize::Landscape)
                .with_quality(ImageQuality::High),
        )
        .await
        .unwrap();

    assert_eq!(output.bytes().map(|b| b.to_vec()), Some(PNG_BYTES.to_vec()));
}

#[tokio::test]
async fn test_generate_saves_to_nested_path() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(GENERATIONS))
        .respond_with(success_response(image_envelope(PNG_BYTES)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("renders/2024/fox.png");
    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();

    let output = client
        .generate(ImageGenerationRequest::new("A fox").with_output_file(&target))
        .await
        .unwrap();

    assert_eq!(output, ArtifactOutput::Saved(target.clone()));
    assert_eq!(std::fs::read(&target).unwrap(), PNG_BYTES);
}

#[tokio::test]
async fn test_generate_400_is_http_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(GENERATIONS))
        .respond_with(error_response(
            400,
            json!({"error": {"code": "contentFilter", "message": "blocked by safety system"}}),
        ))
        .mount(&server)
        .await;

    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();
    let err = client
        .generate(ImageGenerationRequest::new("blocked"))
        .await
        .unwrap_err();

    match err {
        FoundryError::Http {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "blocked by safety system");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_429_exposes_retry_after() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(GENERATIONS))
        .respond_with(
            error_response(429, json!({"error": {"code": "429", "message": "slow down"}}))
                .insert_header("retry-after", "7"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();
    let err = client
        .generate(ImageGenerationRequest::new("A fox"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(
        err,
        FoundryError::Http {
            status: 429,
            retry_after_secs: Some(7),
            ..
        }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_blocking_integration() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(GENERATIONS))
        .and(header("api-key", API_KEY))
        .respond_with(success_response(image_envelope(PNG_BYTES)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, ServiceKind::Images);
    let bytes = tokio::task::spawn_blocking(move || {
        let client = ImageClient::new(config).unwrap();
        let output = client
            .generate_blocking(ImageGenerationRequest::new("A fox"))
            .unwrap();
        output.into_bytes().unwrap().to_vec()
    })
    .await
    .unwrap();

    assert_eq!(bytes, PNG_BYTES);
}

#[tokio::test]
async fn test_edit_streams_multipart_parts() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(EDITS))
        .and(header("api-key", API_KEY))
        .and(body_string_contains(r#"name="image"; filename="room.png""#))
        .and(body_string_contains(r#"name="mask"; filename="mask.png""#))
        .and(body_string_contains(r#"name="image"; filename="sofa.png""#))
        .and(body_string_contains(r#"name="prompt""#))
        .and(body_string_contains("put the sofa by the window"))
        .respond_with(success_response(image_envelope(b"edited")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let room = dir.path().join("room.png");
    let mask = dir.path().join("mask.png");
    let sofa = dir.path().join("sofa.png");
    // Multipart matchers read the body as UTF-8.
    for path in [&room, &mask, &sofa] {
        std::fs::write(path, b"png-placeholder").unwrap();
    }

    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();
    let output = client
        .edit(
            ImageEditRequest::new(&room, "put the sofa by the window")
                .with_mask(&mask)
                .with_additional_image(&sofa),
        )
        .await
        .unwrap();

    assert_eq!(output.bytes().map(|b| b.to_vec()), Some(b"edited".to_vec()));
}

#[tokio::test]
async fn test_edit_missing_file_makes_no_request() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(success_response(image_envelope(PNG_BYTES)))
        .expect(0)
        .mount(&server)
        .await;

    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();
    let err = client
        .edit(ImageEditRequest::new("/definitely/missing.png", "x"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_blocking_integration() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(EDITS))
        .and(body_string_contains(r#"name="quality""#))
        .respond_with(success_response(image_envelope(b"edited")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, b"png-placeholder").unwrap();
    let target = dir.path().join("out.png");
    let config = config_for(&server, ServiceKind::Images);
    let request = ImageEditRequest::new(&input, "add snow").with_output_file(&target);

    let output = tokio::task::spawn_blocking(move || {
        ImageClient::new(config).unwrap().edit_blocking(request).unwrap()
    })
    .await
    .unwrap();

    assert!(output.is_saved());
    assert_eq!(std::fs::read(&target).unwrap(), b"edited");
}

#[tokio::test]
async fn test_dropping_future_cancels_request() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(GENERATIONS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(image_envelope(PNG_BYTES))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = ImageClient::new(config_for(&server, ServiceKind::Images)).unwrap();
    let result = tokio::time::timeout(
        Duration::from_millis(100),
        client.generate(ImageGenerationRequest::new("slow")),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_flux_generate_integration() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/providers/blackforestlabs/v1/flux-2-pro"))
        .and(query_param("api-version", "preview"))
        .and(body_json(json!({
            "prompt": "neon city",
            "model": "flux.2-pro",
            "width": 1024,
            "height": 1024,
            "output_format": "jpeg"
        })))
        .respond_with(success_response(json!({
            "data": [{ "base64": STANDARD.encode(PNG_BYTES) }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder(ServiceKind::Images)
        .endpoint(server.uri())
        .deployment_name("FLUX.2-pro")
        .api_key(API_KEY)
        .build()
        .unwrap();
    let client = ImageClient::new(config)
        .unwrap()
        .with_model(ImageModel::Flux2Pro)
        .with_output_format("jpeg");

    let output = client
        .generate(ImageGenerationRequest::new("neon city"))
        .await
        .unwrap();
    assert_eq!(output.bytes().map(|b| b.to_vec()), Some(PNG_BYTES.to_vec()));
}
