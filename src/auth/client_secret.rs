//! OAuth2 client-credentials grant against Microsoft Entra ID.

use crate::auth::{AccessToken, TokenCredential};
use crate::errors::AuthenticationError;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::OnceLock;
use url::Url;

/// Default Entra ID authority.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

struct CachedToken {
    scope: String,
    token: AccessToken,
}

/// Service principal credential (`tenant_id`, `client_id`, `client_secret`).
///
/// Tokens are cached per scope until they enter the refresh buffer.
pub struct ClientSecretCredential {
    tenant_id: String,
    client_id: String,
    client_secret: SecretString,
    authority_host: Url,
    http: reqwest::Client,
    blocking_http: OnceLock<reqwest::blocking::Client>,
    cache: RwLock<Option<CachedToken>>,
}

impl ClientSecretCredential {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, AuthenticationError> {
        let authority_host = Url::parse(DEFAULT_AUTHORITY_HOST)
            .map_err(|e| AuthenticationError::TokenAcquisition(e.to_string()))?;
        Ok(Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            authority_host,
            http: reqwest::Client::new(),
            blocking_http: OnceLock::new(),
            cache: RwLock::new(None),
        })
    }

    /// Reads `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self, AuthenticationError> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| {
                AuthenticationError::TokenAcquisition(format!(
                    "{name} environment variable not set"
                ))
            })
        };
        Self::new(
            var("AZURE_TENANT_ID")?,
            var("AZURE_CLIENT_ID")?,
            var("AZURE_CLIENT_SECRET")?,
        )
    }

    /// Overrides the authority host (sovereign clouds, tests).
    pub fn with_authority_host(mut self, authority_host: Url) -> Self {
        self.authority_host = authority_host;
        self
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.as_str().trim_end_matches('/'),
            self.tenant_id
        )
    }

    fn form(&self, scope: &str) -> [(&'static str, String); 4] {
        [
            ("grant_type", "client_credentials".to_string()),
            ("client_id", self.client_id.clone()),
            ("client_secret", self.client_secret.expose_secret().clone()),
            ("scope", scope.to_string()),
        ]
    }

    fn cached(&self, scope: &str) -> Option<AccessToken> {
        self.cache
            .read()
            .as_ref()
            .filter(|c| c.scope == scope && !c.token.needs_refresh())
            .map(|c| c.token.clone())
    }

    fn store(&self, scope: &str, token: &AccessToken) {
        *self.cache.write() = Some(CachedToken {
            scope: scope.to_string(),
            token: token.clone(),
        });
    }

    fn parse_token_response(status: u16, body: &[u8]) -> Result<AccessToken, AuthenticationError> {
        if !(200..300).contains(&status) {
            let message = serde_json::from_slice::<TokenErrorResponse>(body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
            return Err(AuthenticationError::TokenRejected { status, message });
        }

        let parsed: TokenResponse = serde_json::from_slice(body).map_err(|e| {
            AuthenticationError::TokenAcquisition(format!("malformed token response: {e}"))
        })?;
        Ok(AccessToken::new(
            parsed.access_token,
            Utc::now() + Duration::seconds(parsed.expires_in),
        ))
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, AuthenticationError> {
        if let Some(client) = self.blocking_http.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| AuthenticationError::TokenAcquisition(e.to_string()))?;
        Ok(self.blocking_http.get_or_init(|| client))
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        let scope = scopes.join(" ");
        if let Some(token) = self.cached(&scope) {
            return Ok(token);
        }

        tracing::debug!(tenant_id = %self.tenant_id, scope = %scope, "requesting access token");
        let response = self
            .http
            .post(self.token_url())
            .form(&self.form(&scope))
            .send()
            .await
            .map_err(|e| AuthenticationError::TokenAcquisition(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthenticationError::TokenAcquisition(e.to_string()))?;

        let token = Self::parse_token_response(status, &body)?;
        self.store(&scope, &token);
        Ok(token)
    }

    fn get_token_blocking(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        let scope = scopes.join(" ");
        if let Some(token) = self.cached(&scope) {
            return Ok(token);
        }

        tracing::debug!(tenant_id = %self.tenant_id, scope = %scope, "requesting access token");
        let response = self
            .blocking_client()?
            .post(self.token_url())
            .form(&self.form(&scope))
            .send()
            .map_err(|e| AuthenticationError::TokenAcquisition(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| AuthenticationError::TokenAcquisition(e.to_string()))?;

        let token = Self::parse_token_response(status, &body)?;
        self.store(&scope, &token);
        Ok(token)
    }
}

impl std::fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("authority_host", &self.authority_host.as_str())
            .finish()
    }
}
