use crate::auth::{AccessToken, AuthProvider, TokenCredential};
use crate::errors::{AuthenticationError, FoundryError, FoundryResult};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use std::sync::Arc;

/// Bearer authentication backed by a [`TokenCredential`].
///
/// A token is requested for every call; expiry between calls is the
/// credential's concern. Failures are reported as authentication errors and
/// never retried here.
pub struct BearerTokenAuth {
    credential: Arc<dyn TokenCredential>,
    scopes: Vec<String>,
}

impl BearerTokenAuth {
    pub fn new(credential: Arc<dyn TokenCredential>, scope: impl Into<String>) -> Self {
        Self {
            credential,
            scopes: vec![scope.into()],
        }
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    fn scope_refs(&self) -> Vec<&str> {
        self.scopes.iter().map(String::as_str).collect()
    }

    fn insert_header(token: &AccessToken, headers: &mut HeaderMap) -> FoundryResult<()> {
        let mut value = HeaderValue::from_str(&token.authorization_header()).map_err(|_| {
            FoundryError::Authentication(AuthenticationError::InvalidHeaderValue(
                http::header::AUTHORIZATION.to_string(),
            ))
        })?;
        value.set_sensitive(true);
        headers.insert(http::header::AUTHORIZATION, value);
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for BearerTokenAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> FoundryResult<()> {
        let scopes = self.scope_refs();
        let token = self.credential.get_token(&scopes).await.map_err(|e| {
            tracing::warn!(error = %e, "token acquisition failed");
            FoundryError::Authentication(e)
        })?;
        Self::insert_header(&token, headers)
    }

    fn apply_auth_blocking(&self, headers: &mut HeaderMap) -> FoundryResult<()> {
        let scopes = self.scope_refs();
        let token = self.credential.get_token_blocking(&scopes).map_err(|e| {
            tracing::warn!(error = %e, "token acquisition failed");
            FoundryError::Authentication(e)
        })?;
        Self::insert_header(&token, headers)
    }

    fn scheme(&self) -> &'static str {
        "Bearer"
    }
}

impl std::fmt::Debug for BearerTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuth")
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}
