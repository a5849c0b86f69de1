use crate::errors::FoundryError;
use serde::{Deserialize, Serialize};

/// Azure error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServiceErrorResponse {
    pub error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServiceErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

pub struct ErrorMapper;

impl ErrorMapper {
    /// Builds the error for a non-2xx response. The body is kept verbatim for
    /// diagnostics; the error envelope is only consulted for a readable message.
    pub fn from_response(status: u16, headers: &http::HeaderMap, body: &[u8]) -> FoundryError {
        let body_text = if body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(body).into_owned())
        };

        let detail = body_text
            .as_deref()
            .and_then(Self::parse_error_response)
            .map(|r| r.error);

        let message = detail
            .as_ref()
            .and_then(|d| d.message.clone())
            .unwrap_or_else(|| Self::default_message(status));
        let error_code = detail.and_then(|d| d.code);

        FoundryError::Http {
            status,
            message,
            body: body_text,
            error_code,
            retry_after_secs: Self::extract_retry_after(headers),
        }
    }

    /// Extracts retry-after header value in seconds
    pub fn extract_retry_after(headers: &http::HeaderMap) -> Option<u64> {
        headers
            .get(http::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
    }

    pub fn parse_error_response(body: &str) -> Option<ServiceErrorResponse> {
        serde_json::from_str(body).ok()
    }

    fn default_message(status: u16) -> String {
        http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(|reason| format!("HTTP {status} {reason}"))
            .unwrap_or_else(|| format!("HTTP error: {status}"))
    }
}
