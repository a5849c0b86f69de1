use crate::auth::{provider_for, AuthProvider};
use crate::client::{ClientConfig, ClientCore, ServiceKind};
use crate::errors::{ConfigurationError, FoundryError, FoundryResult};
use crate::services::images::ImageClient;
use crate::services::video::VideoClient;
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

/// Assembles service clients, optionally with an injected transport or auth
/// provider. Without a configuration the client is resolved from the
/// environment.
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_auth_provider(mut self, auth_provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = Some(auth_provider);
        self
    }

    pub fn build_image_client(self) -> FoundryResult<ImageClient> {
        Ok(ImageClient::from_core(self.build_core(ServiceKind::Images)?))
    }

    pub fn build_video_client(self) -> FoundryResult<VideoClient> {
        Ok(VideoClient::from_core(self.build_core(ServiceKind::Video)?))
    }

    fn build_core(self, expected: ServiceKind) -> FoundryResult<ClientCore> {
        let config = match self.config {
            Some(config) => config,
            None => ClientConfig::from_env(expected)?,
        };
        if config.service != expected {
            return Err(FoundryError::Configuration(
                ConfigurationError::ServiceMismatch {
                    expected: expected.to_string(),
                    actual: config.service.to_string(),
                },
            ));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };
        let auth = self
            .auth_provider
            .unwrap_or_else(|| provider_for(config.credential()));

        tracing::debug!(
            service = %config.service,
            endpoint = config.endpoint_base(),
            deployment = %config.deployment_name,
            auth = auth.scheme(),
            "client constructed"
        );
        Ok(ClientCore::new(config, transport, auth))
    }
}
