//! Scripted token credential

use crate::auth::{AccessToken, TokenCredential};
use crate::errors::AuthenticationError;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Hands out the configured tokens in order, repeating the last one.
#[derive(Clone, Default)]
pub struct MockTokenCredential {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    tokens: VecDeque<String>,
    failure: Option<String>,
    scopes: Vec<String>,
    calls: usize,
}

impl MockTokenCredential {
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credential = Self::default();
        credential.inner.lock().unwrap().tokens = tokens.into_iter().map(Into::into).collect();
        credential
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let credential = Self::default();
        credential.inner.lock().unwrap().failure = Some(message.into());
        credential
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    pub fn requested_scopes(&self) -> Vec<String> {
        self.inner.lock().unwrap().scopes.clone()
    }

    fn next_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        inner.scopes.push(scopes.join(" "));
        if let Some(message) = &inner.failure {
            return Err(AuthenticationError::TokenAcquisition(message.clone()));
        }
        let token = if inner.tokens.len() > 1 {
            inner.tokens.pop_front()
        } else {
            inner.tokens.front().cloned()
        }
        .ok_or_else(|| AuthenticationError::TokenAcquisition("no token configured".into()))?;
        Ok(AccessToken::new(token, Utc::now() + Duration::hours(1)))
    }
}

#[async_trait]
impl TokenCredential for MockTokenCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        self.next_token(scopes)
    }

    fn get_token_blocking(&self, scopes: &[&str]) -> Result<AccessToken, AuthenticationError> {
        self.next_token(scopes)
    }
}
