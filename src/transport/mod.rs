mod http_transport;
mod multipart;
mod request_builder;
mod response_parser;

pub use http_transport::ReqwestTransport;
pub use multipart::{MultipartPart, MultipartPayload, PartBody};
pub use request_builder::RequestBuilder;
pub use response_parser::ResponseParser;

use crate::errors::FoundryResult;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use url::Url;

/// Outbound body. Multipart parts referencing files are opened by the
/// transport so uploads stream from disk.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Bytes),
    Multipart(MultipartPayload),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Single-attempt HTTP round trip in both calling conventions.
///
/// Implementations return the response whatever its status; status handling
/// lives in [`ResponseParser`]. No retries and no timeout beyond the
/// underlying client's default.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> FoundryResult<HttpResponse>;

    fn send_blocking(&self, request: HttpRequest) -> FoundryResult<HttpResponse>;
}
