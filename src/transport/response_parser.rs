use crate::errors::{ErrorMapper, FoundryError, FoundryResult};
use crate::transport::HttpResponse;
use serde::de::DeserializeOwned;

pub struct ResponseParser;

impl ResponseParser {
    /// Passes 2xx responses through; anything else becomes
    /// [`FoundryError::Http`] and its body is never parsed as a success payload.
    pub fn ensure_success(response: HttpResponse) -> FoundryResult<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }
        let error = ErrorMapper::from_response(response.status, &response.headers, &response.body);
        tracing::warn!(status = response.status, error = %error, "request rejected by service");
        Err(error)
    }

    pub fn parse_json<T: DeserializeOwned>(data: &[u8]) -> FoundryResult<T> {
        serde_json::from_slice(data).map_err(|e| {
            tracing::debug!(body = %String::from_utf8_lossy(data), "undecodable response body");
            FoundryError::from(e)
        })
    }
}
