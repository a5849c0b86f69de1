use crate::auth::TokenCredential;
use crate::errors::{ConfigurationError, FoundryError, FoundryResult};
use secrecy::SecretString;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_IMAGE_DEPLOYMENT: &str = "gpt-image-1";
pub const DEFAULT_IMAGE_API_VERSION: &str = "2025-04-01-preview";
pub const DEFAULT_VIDEO_DEPLOYMENT: &str = "sora";
pub const DEFAULT_VIDEO_API_VERSION: &str = "preview";

/// Which remote service a configuration targets; drives the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Images,
    Video,
}

impl ServiceKind {
    pub fn default_deployment(&self) -> &'static str {
        match self {
            ServiceKind::Images => DEFAULT_IMAGE_DEPLOYMENT,
            ServiceKind::Video => DEFAULT_VIDEO_DEPLOYMENT,
        }
    }

    pub fn default_api_version(&self) -> &'static str {
        match self {
            ServiceKind::Images => DEFAULT_IMAGE_API_VERSION,
            ServiceKind::Video => DEFAULT_VIDEO_API_VERSION,
        }
    }

    /// Environment variables consulted, in order, when no key is passed explicitly.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            ServiceKind::Images => &["GPTIMAGE1KEY", "AZURE_API_KEY"],
            ServiceKind::Video => &["AZURE_OPENAI_API_KEY"],
        }
    }

    pub fn endpoint_env_var(&self) -> Option<&'static str> {
        match self {
            ServiceKind::Images => None,
            ServiceKind::Video => Some("SORA_ENDPOINT_URL"),
        }
    }

    pub fn deployment_env_var(&self) -> Option<&'static str> {
        match self {
            ServiceKind::Images => None,
            ServiceKind::Video => Some("SORA_DEPLOYMENT_NAME"),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Images => f.write_str("images"),
            ServiceKind::Video => f.write_str("video"),
        }
    }
}

/// The authentication mechanism a configuration resolved to.
#[derive(Clone)]
pub enum Credential {
    ApiKey(SecretString),
    TokenProvider(Arc<dyn TokenCredential>),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Credential::TokenProvider(_) => f.write_str("TokenProvider"),
        }
    }
}

/// Immutable per-client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    pub service: ServiceKind,
    pub endpoint: Url,
    pub deployment_name: String,
    pub api_version: String,
    pub(crate) credential: Credential,
    pub user_agent: String,
    pub max_idle_connections: usize,
    pub proxy: Option<Url>,
}

impl ClientConfig {
    pub fn builder(service: ServiceKind) -> ClientConfigBuilder {
        ClientConfigBuilder::new(service)
    }

    /// Resolves everything from environment variables.
    ///
    /// - Images: `GPTIMAGE1KEY` or `AZURE_API_KEY` (endpoint must still be set on
    ///   the builder, so this only succeeds for video)
    /// - Video: `SORA_ENDPOINT_URL` (required), `SORA_DEPLOYMENT_NAME`,
    ///   `AZURE_OPENAI_API_KEY`
    pub fn from_env(service: ServiceKind) -> FoundryResult<Self> {
        ClientConfigBuilder::new(service).build()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Endpoint without a trailing slash.
    pub fn endpoint_base(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }

    pub fn uses_api_key(&self) -> bool {
        matches!(self.credential, Credential::ApiKey(_))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("service", &self.service)
            .field("endpoint", &self.endpoint.as_str())
            .field("deployment_name", &self.deployment_name)
            .field("api_version", &self.api_version)
            .field("credential", &self.credential)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

pub struct ClientConfigBuilder {
    service: ServiceKind,
    endpoint: Option<String>,
    deployment_name: Option<String>,
    api_version: Option<String>,
    api_key: Option<String>,
    token_credential: Option<Arc<dyn TokenCredential>>,
    user_agent: Option<String>,
    max_idle_connections: Option<usize>,
    proxy: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new(service: ServiceKind) -> Self {
        Self {
            service,
            endpoint: None,
            deployment_name: None,
            api_version: None,
            api_key: None,
            token_credential: None,
            user_agent: None,
            max_idle_connections: None,
            proxy: None,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn deployment_name(mut self, deployment_name: impl Into<String>) -> Self {
        self.deployment_name = Some(deployment_name.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Explicit key; wins over any environment-sourced key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Token provider, used only when no key resolves.
    pub fn token_credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.token_credential = Some(credential);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn max_idle_connections(mut self, max: usize) -> Self {
        self.max_idle_connections = Some(max);
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn build(self) -> FoundryResult<ClientConfig> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    /// Resolution step run once at construction: explicit value, then
    /// environment lookup, then failure.
    pub(crate) fn build_with_env<F>(self, env: F) -> FoundryResult<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: Option<&str>| {
            name.and_then(|n| env(n))
                .filter(|v| !v.trim().is_empty())
        };

        let endpoint = non_empty(self.endpoint)
            .or_else(|| lookup(self.service.endpoint_env_var()))
            .ok_or_else(|| {
                FoundryError::Configuration(ConfigurationError::MissingEndpoint(match self
                    .service
                    .endpoint_env_var()
                {
                    Some(var) => format!("endpoint must be provided or set in {var}"),
                    None => "endpoint must be provided".to_string(),
                }))
            })?;
        let endpoint = parse_endpoint(&endpoint)?;

        let deployment_name = non_empty(self.deployment_name)
            .or_else(|| lookup(self.service.deployment_env_var()))
            .unwrap_or_else(|| self.service.default_deployment().to_string());

        let api_version = non_empty(self.api_version)
            .unwrap_or_else(|| self.service.default_api_version().to_string());

        let env_key = self
            .service
            .api_key_env_vars()
            .iter()
            .find_map(|var| lookup(Some(*var)));

        let credential = match (non_empty(self.api_key).or(env_key), self.token_credential) {
            (Some(key), _) => Credential::ApiKey(SecretString::new(key)),
            (None, Some(provider)) => Credential::TokenProvider(provider),
            (None, None) => {
                return Err(FoundryError::Configuration(
                    ConfigurationError::MissingCredentials(format!(
                        "API key must be provided, set in {}, or a token credential configured",
                        self.service.api_key_env_vars().join(" / ")
                    )),
                ))
            }
        };

        let proxy = match non_empty(self.proxy) {
            Some(p) => Some(Url::parse(&p).map_err(|e| {
                FoundryError::Configuration(ConfigurationError::InvalidProxy(e.to_string()))
            })?),
            None => None,
        };

        Ok(ClientConfig {
            service: self.service,
            endpoint,
            deployment_name,
            api_version,
            credential,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            max_idle_connections: self
                .max_idle_connections
                .unwrap_or_else(default_max_idle_connections),
            proxy,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_endpoint(raw: &str) -> FoundryResult<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        other => Err(FoundryError::Configuration(
            ConfigurationError::InvalidEndpoint(format!("unsupported scheme '{other}'")),
        )),
    }
}

fn default_max_idle_connections() -> usize {
    16
}

fn default_user_agent() -> String {
    format!("integrations-foundry-media/{}", env!("CARGO_PKG_VERSION"))
}

impl Credential {
    #[cfg(test)]
    pub(crate) fn api_key_value(&self) -> Option<&str> {
        use secrecy::ExposeSecret;
        match self {
            Credential::ApiKey(key) => Some(key.expose_secret()),
            Credential::TokenProvider(_) => None,
        }
    }
}
