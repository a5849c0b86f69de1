//! Image generation fixtures

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;

/// A 1x1 transparent PNG.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64,
    0xF8, 0xCF, 0x50, 0x0F, 0x00, 0x03, 0x86, 0x01, 0x80, 0x5A, 0x34, 0x7D, 0x6B, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Envelope carrying each image as a `b64_json` entry.
pub fn b64_envelope(images: &[&[u8]]) -> String {
    let data: Vec<_> = images
        .iter()
        .map(|bytes| json!({ "b64_json": STANDARD.encode(bytes) }))
        .collect();
    json!({ "created": 1_745_000_000, "data": data }).to_string()
}

/// Successful gpt-image-1 response containing [`PNG_BYTES`].
pub fn image_generation_response() -> String {
    b64_envelope(&[PNG_BYTES])
}

/// FLUX response using the `image_base64` field name.
pub fn flux_generation_response() -> String {
    json!({
        "data": [{ "image_base64": STANDARD.encode(PNG_BYTES) }]
    })
    .to_string()
}

/// Writes a small PNG into `dir` and returns its path.
pub fn write_png(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, PNG_BYTES).unwrap();
    path
}
