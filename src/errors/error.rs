use crate::errors::categories::{
    AuthenticationError, ConfigurationError, DecodeError, JobError, NetworkError,
    NotFoundError, ValidationError,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type FoundryResult<T> = Result<T, FoundryError>;

#[derive(Error, Debug)]
pub enum FoundryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// The service answered with a non-2xx status.
    #[error("HTTP error: {status} - {message}")]
    Http {
        status: u16,
        message: String,
        body: Option<String>,
        error_code: Option<String>,
        retry_after_secs: Option<u64>,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Job error: {0}")]
    Job(#[from] JobError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FoundryError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        FoundryError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Classification hint for callers running their own retry policy.
    /// Nothing inside this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            FoundryError::Network(_) => true,
            FoundryError::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_authentication_error(&self) -> bool {
        matches!(self, FoundryError::Authentication(_))
            || matches!(self, FoundryError::Http { status: 401 | 403, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FoundryError::NotFound(_))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            FoundryError::Http { status, .. } => Some(*status),
            FoundryError::Authentication(AuthenticationError::TokenRejected { status, .. }) => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            FoundryError::Http { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    pub fn response_body(&self) -> Option<&str> {
        match self {
            FoundryError::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FoundryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FoundryError::Network(NetworkError::ConnectionTimeout(err.to_string()))
        } else if err.is_connect() {
            FoundryError::Network(NetworkError::ConnectionFailed(err.to_string()))
        } else if err.is_body() || err.is_decode() {
            FoundryError::Network(NetworkError::BodyRead(err.to_string()))
        } else {
            FoundryError::Network(NetworkError::RequestFailed(err.to_string()))
        }
    }
}

impl From<serde_json::Error> for FoundryError {
    fn from(err: serde_json::Error) -> Self {
        FoundryError::Decode(DecodeError::MalformedJson(err.to_string()))
    }
}

impl From<base64::DecodeError> for FoundryError {
    fn from(err: base64::DecodeError) -> Self {
        FoundryError::Decode(DecodeError::InvalidBase64(err.to_string()))
    }
}

impl From<url::ParseError> for FoundryError {
    fn from(err: url::ParseError) -> Self {
        FoundryError::Configuration(ConfigurationError::InvalidEndpoint(err.to_string()))
    }
}
