//! Mock HTTP transport for testing

use crate::errors::{FoundryError, FoundryResult, NetworkError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct MockHttpTransport {
    inner: Arc<Mutex<MockHttpTransportInner>>,
}

#[derive(Default)]
struct MockHttpTransportInner {
    responses: VecDeque<MockResponse>,
    requests: Vec<HttpRequest>,
    blocking_calls: usize,
}

enum MockResponse {
    Response(HttpResponse),
    Error(FoundryError),
}

impl MockHttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.with_response_headers(status, HeaderMap::new(), body)
    }

    pub fn with_response_headers(
        self,
        status: u16,
        headers: HeaderMap,
        body: impl Into<Bytes>,
    ) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(MockResponse::Response(HttpResponse {
                status,
                headers,
                body: body.into(),
            }));
        self
    }

    /// 200 with a JSON body.
    pub fn with_json_response(self, body: serde_json::Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.with_response_headers(200, headers, body.to_string())
    }

    pub fn with_status_response(self, status: u16, body: serde_json::Value) -> Self {
        self.with_response(status, body.to_string())
    }

    pub fn with_error(self, error: FoundryError) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(MockResponse::Error(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn blocking_calls(&self) -> usize {
        self.inner.lock().unwrap().blocking_calls
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.inner.lock().unwrap().requests.last().cloned()
    }

    /// True if a request with this method hit a URL whose path ends with `path_suffix`.
    pub fn verify_request(&self, method: Method, path_suffix: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .any(|r| r.method == method && r.url.path().ends_with(path_suffix))
    }

    /// JSON body of the request at `index`, if it carried one.
    pub fn json_body(&self, index: usize) -> Option<serde_json::Value> {
        let inner = self.inner.lock().unwrap();
        match &inner.requests.get(index)?.body {
            RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
            _ => None,
        }
    }

    fn respond(&self, request: HttpRequest, blocking: bool) -> FoundryResult<HttpResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request);
        if blocking {
            inner.blocking_calls += 1;
        }
        match inner.responses.pop_front() {
            Some(MockResponse::Response(response)) => Ok(response),
            Some(MockResponse::Error(error)) => Err(error),
            None => Err(FoundryError::Network(NetworkError::RequestFailed(
                "no mock response configured".to_string(),
            ))),
        }
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> FoundryResult<HttpResponse> {
        self.respond(request, false)
    }

    fn send_blocking(&self, request: HttpRequest) -> FoundryResult<HttpResponse> {
        self.respond(request, true)
    }
}
