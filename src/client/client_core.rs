use crate::auth::AuthProvider;
use crate::client::ClientConfig;
use crate::errors::FoundryResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBuilder, ResponseParser};
use http::Method;
use std::sync::Arc;

/// Configuration, transport and auth shared by the service façades.
///
/// Every request goes through [`ClientCore::execute`] or
/// [`ClientCore::execute_blocking`]: authenticate, send once, reject non-2xx.
#[derive(Clone)]
pub struct ClientCore {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
}

impl ClientCore {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            auth,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request rooted at the configured endpoint.
    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        RequestBuilder::new(method, self.config.endpoint.as_str(), segments)
    }

    pub async fn execute(&self, mut request: HttpRequest) -> FoundryResult<HttpResponse> {
        self.auth.apply_auth(&mut request.headers).await?;
        tracing::debug!(
            method = %request.method,
            path = %request.url.path(),
            auth = self.auth.scheme(),
            "dispatching request"
        );
        let response = self.transport.send(request).await?;
        ResponseParser::ensure_success(response)
    }

    pub fn execute_blocking(&self, mut request: HttpRequest) -> FoundryResult<HttpResponse> {
        self.auth.apply_auth_blocking(&mut request.headers)?;
        tracing::debug!(
            method = %request.method,
            path = %request.url.path(),
            auth = self.auth.scheme(),
            "dispatching blocking request"
        );
        let response = self.transport.send_blocking(request)?;
        ResponseParser::ensure_success(response)
    }
}

impl std::fmt::Debug for ClientCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCore")
            .field("config", &self.config)
            .field("auth", &self.auth.scheme())
            .finish_non_exhaustive()
    }
}
