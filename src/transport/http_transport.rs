use crate::client::ClientConfig;
use crate::errors::{ConfigurationError, FoundryError, FoundryResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::HeaderValue;
use std::sync::OnceLock;
use tracing::instrument;
use url::Url;

/// HTTP transport implementation using reqwest.
///
/// The async client is built eagerly. The blocking client is built on first
/// blocking use so that async-only callers never create (or drop) one inside
/// a runtime.
pub struct ReqwestTransport {
    client: reqwest::Client,
    blocking_client: OnceLock<reqwest::blocking::Client>,
    user_agent: String,
    max_idle_connections: usize,
    proxy: Option<Url>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> FoundryResult<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.max_idle_connections)
            .user_agent(&config.user_agent);
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Self::proxy(proxy)?);
        }
        let client = builder.build().map_err(|e| {
            FoundryError::Configuration(ConfigurationError::HttpClient(e.to_string()))
        })?;

        Ok(Self {
            client,
            blocking_client: OnceLock::new(),
            user_agent: config.user_agent.clone(),
            max_idle_connections: config.max_idle_connections,
            proxy: config.proxy.clone(),
        })
    }

    fn proxy(url: &Url) -> FoundryResult<reqwest::Proxy> {
        reqwest::Proxy::all(url.as_str()).map_err(|e| {
            FoundryError::Configuration(ConfigurationError::InvalidProxy(e.to_string()))
        })
    }

    fn blocking_client(&self) -> FoundryResult<&reqwest::blocking::Client> {
        if let Some(client) = self.blocking_client.get() {
            return Ok(client);
        }
        let mut builder = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(self.max_idle_connections)
            .user_agent(&self.user_agent)
            .timeout(None);
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(Self::proxy(proxy)?);
        }
        let client = builder.build().map_err(|e| {
            FoundryError::Configuration(ConfigurationError::HttpClient(e.to_string()))
        })?;
        Ok(self.blocking_client.get_or_init(|| client))
    }

    fn json_content_type() -> HeaderValue {
        HeaderValue::from_static("application/json")
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip_all, fields(method = %request.method, path = %request.url.path()))]
    async fn send(&self, request: HttpRequest) -> FoundryResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, Self::json_content_type())
                .body(bytes),
            RequestBody::Multipart(payload) => builder.multipart(payload.into_async_form().await?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    #[instrument(skip_all, fields(method = %request.method, path = %request.url.path()))]
    fn send_blocking(&self, request: HttpRequest) -> FoundryResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.blocking_client()?.request(method, url).headers(headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, Self::json_content_type())
                .body(bytes.to_vec()),
            RequestBody::Multipart(payload) => builder.multipart(payload.into_blocking_form()?),
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes()?;
        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("user_agent", &self.user_agent)
            .field("max_idle_connections", &self.max_idle_connections)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}
