use crate::errors::{ConfigurationError, FoundryError, FoundryResult, ValidationError};
use crate::transport::{HttpRequest, MultipartPayload, RequestBody};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::str::FromStr;
use url::Url;

/// Composes `{base}/{segment}/{segment}?{query}` requests.
///
/// Segments are percent-encoded individually, so deployment names and job ids
/// can be passed through as-is.
pub struct RequestBuilder {
    method: Method,
    base: String,
    segments: Vec<String>,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: RequestBody,
}

impl RequestBuilder {
    pub fn new(method: Method, base: &str, segments: &[&str]) -> Self {
        Self {
            method,
            base: base.to_string(),
            segments: segments.iter().map(|s| s.to_string()).collect(),
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(base: &str, segments: &[&str]) -> Self {
        Self::new(Method::GET, base, segments)
    }

    pub fn post(base: &str, segments: &[&str]) -> Self {
        Self::new(Method::POST, base, segments)
    }

    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> FoundryResult<Self> {
        let header_name = HeaderName::from_str(name.as_ref()).map_err(|e| {
            FoundryError::Validation(ValidationError::InvalidParameter {
                parameter: "header_name".to_string(),
                reason: e.to_string(),
            })
        })?;

        let header_value = HeaderValue::from_str(value.as_ref()).map_err(|e| {
            FoundryError::Validation(ValidationError::InvalidParameter {
                parameter: "header_value".to_string(),
                reason: e.to_string(),
            })
        })?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    pub fn api_version(self, version: &str) -> Self {
        self.query("api-version", version)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> FoundryResult<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| {
            FoundryError::Serialization(format!("Failed to serialize JSON body: {}", e))
        })?;
        self.body = RequestBody::Json(Bytes::from(bytes));
        Ok(self)
    }

    pub fn multipart(mut self, payload: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    pub fn build_url(&self) -> FoundryResult<Url> {
        let mut url = Url::parse(&self.base)?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                FoundryError::Configuration(ConfigurationError::InvalidEndpoint(format!(
                    "{} cannot be used as a base URL",
                    self.base
                )))
            })?;
            path.pop_if_empty();
            for segment in &self.segments {
                path.push(segment);
            }
        }
        if !self.query_params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub fn build(self) -> FoundryResult<HttpRequest> {
        let url = self.build_url()?;
        Ok(HttpRequest {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
