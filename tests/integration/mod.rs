//! Integration tests using WireMock
//!
//! Each test drives a real client over HTTP against a local mock server,
//! covering URL composition, authentication headers, body encoding, status
//! handling and output delivery in both calling conventions.

pub mod images;
pub mod video;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use integrations_foundry_media::{ClientConfig, ServiceKind};
use wiremock::{MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRfake-image-bytes";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn config_for(server: &MockServer, service: ServiceKind) -> ClientConfig {
    ClientConfig::builder(service)
        .endpoint(server.uri())
        .api_key(API_KEY)
        .build()
        .expect("valid configuration")
}

pub fn image_envelope(bytes: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "created": 1_745_000_000,
        "data": [{ "b64_json": STANDARD.encode(bytes) }]
    })
}

pub fn error_response(status: u16, error_body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(error_body)
}

pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
