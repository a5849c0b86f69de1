use crate::auth::AuthProvider;
use crate::errors::{AuthenticationError, FoundryError, FoundryResult};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Header carrying a static Azure key.
pub const API_KEY_HEADER: &str = "api-key";

/// Static key authentication (`api-key: <key>`).
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    pub fn from_secret(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Last four characters, for log lines.
    pub fn key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.len() > 4 {
            format!("...{}", &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }

    fn insert_header(&self, headers: &mut HeaderMap) -> FoundryResult<()> {
        let mut value = HeaderValue::from_str(self.api_key.expose_secret()).map_err(|_| {
            FoundryError::Authentication(AuthenticationError::InvalidHeaderValue(
                API_KEY_HEADER.to_string(),
            ))
        })?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for ApiKeyAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> FoundryResult<()> {
        self.insert_header(headers)
    }

    fn apply_auth_blocking(&self, headers: &mut HeaderMap) -> FoundryResult<()> {
        self.insert_header(headers)
    }

    fn scheme(&self) -> &'static str {
        "api-key"
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}
