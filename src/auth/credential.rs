//! Token credential abstraction.
//!
//! A credential mints short-lived bearer tokens for a resource audience. The
//! client asks for a token right before every request and leaves caching to
//! the credential itself.

use crate::errors::AuthenticationError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Refresh tokens this long before they expire.
pub const TOKEN_EXPIRY_BUFFER_SECONDS: i64 = 300;

/// External identity component able to produce bearer tokens.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Fetches a token for the given scopes without blocking the executor.
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError>;

    /// Fetches a token on the calling thread.
    fn get_token_blocking(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError>;
}

/// Bearer token with its expiry.
#[derive(Clone)]
pub struct AccessToken {
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// True within the refresh buffer before expiry.
    pub fn needs_refresh(&self) -> bool {
        let threshold = self.expires_at - Duration::seconds(TOKEN_EXPIRY_BUFFER_SECONDS);
        Utc::now() >= threshold
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Credential returning a token minted elsewhere (CLI login, managed identity sidecar).
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: AccessToken::new(token, expires_at),
        }
    }

    fn current(&self) -> Result<AccessToken, AuthenticationError> {
        if self.token.is_expired() {
            return Err(AuthenticationError::TokenAcquisition(format!(
                "static token expired at {}",
                self.token.expires_at
            )));
        }
        Ok(self.token.clone())
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        self.current()
    }

    fn get_token_blocking(&self, _scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        self.current()
    }
}
