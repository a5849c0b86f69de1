//! Turns successful response bodies into artifact bytes and delivers them.

mod sink;

pub use sink::{deliver, deliver_blocking, ArtifactOutput};

use crate::errors::{DecodeError, FoundryError, FoundryResult};
use crate::transport::ResponseParser;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;

/// `{"created": ..., "data": [{"b64_json": "..."}]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEnvelope {
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Option<Vec<ImageDatum>>,
}

/// One entry of an image envelope. FLUX deployments name the payload field
/// `base64` or `image_base64` instead of `b64_json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDatum {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

impl ImageDatum {
    fn payload(self) -> Option<String> {
        self.b64_json.or(self.base64).or(self.image_base64)
    }
}

/// Decodes the first entry of an image envelope.
pub fn decode_image(body: &[u8]) -> FoundryResult<Bytes> {
    let envelope: ImageEnvelope = ResponseParser::parse_json(body)?;
    let data = envelope
        .data
        .ok_or_else(|| DecodeError::MissingField("data".to_string()))?;
    if data.len() > 1 {
        tracing::debug!(entries = data.len(), "using first image of envelope");
    }
    let first = data.into_iter().next().ok_or(DecodeError::EmptyData)?;
    let encoded = first
        .payload()
        .ok_or_else(|| DecodeError::MissingField("data[0].b64_json".to_string()))?;

    let bytes = STANDARD.decode(encoded.trim()).map_err(FoundryError::from)?;
    Ok(Bytes::from(bytes))
}
