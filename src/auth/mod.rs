mod api_key;
mod bearer;
mod client_secret;
mod credential;

pub use api_key::ApiKeyAuth;
pub use bearer::BearerTokenAuth;
pub use client_secret::ClientSecretCredential;
pub use credential::{AccessToken, StaticTokenCredential, TokenCredential};

use crate::client::Credential;
use crate::errors::FoundryResult;
use async_trait::async_trait;
use http::HeaderMap;
use std::sync::Arc;

/// Audience requested from credential providers for Azure AI services.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// Produces the authentication headers for the next outbound request.
///
/// Both calling conventions go through the same provider; the blocking variant
/// must not require an async runtime.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Adds authentication headers for a non-blocking call.
    async fn apply_auth(&self, headers: &mut HeaderMap) -> FoundryResult<()>;

    /// Adds authentication headers for a blocking call.
    fn apply_auth_blocking(&self, headers: &mut HeaderMap) -> FoundryResult<()>;

    /// Name of the scheme, for diagnostics only.
    fn scheme(&self) -> &'static str;
}

/// Builds the provider matching a resolved credential.
pub fn provider_for(credential: &Credential) -> Arc<dyn AuthProvider> {
    match credential {
        Credential::ApiKey(key) => Arc::new(ApiKeyAuth::from_secret(key.clone())),
        Credential::TokenProvider(provider) => Arc::new(BearerTokenAuth::new(
            provider.clone(),
            COGNITIVE_SERVICES_SCOPE,
        )),
    }
}
