use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Missing endpoint: {0}")]
    MissingEndpoint(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("Service mismatch: client for {expected} built from {actual} configuration")]
    ServiceMismatch { expected: String, actual: String },

    #[error("HTTP client construction failed: {0}")]
    HttpClient(String),
}

#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),

    #[error("Token endpoint rejected the request: {status} - {message}")]
    TokenRejected { status: u16, message: String },

    #[error("Invalid header value for {0}")]
    InvalidHeaderValue(String),
}

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: String,
        max: String,
        value: String,
    },

    #[error("Invalid parameter: {parameter} - {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    #[error("Response body could not be read: {0}")]
    BodyRead(String),
}

#[derive(Error, Debug, Clone)]
pub enum DecodeError {
    #[error("Malformed JSON response: {0}")]
    MalformedJson(String),

    #[error("Response envelope has no data entries")]
    EmptyData,

    #[error("Response is missing field: {0}")]
    MissingField(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

#[derive(Error, Debug, Clone)]
pub enum JobError {
    #[error("Job {job_id} failed: {message}")]
    Failed { job_id: String, message: String },

    #[error("Job {job_id} ended with status {status}")]
    Terminated { job_id: String, status: String },

    #[error("Job {job_id} did not complete within {timeout:?}")]
    Timeout { job_id: String, timeout: Duration },

    #[error("Job {0} completed without generations")]
    NoGenerations(String),
}

/// Input file that could not be located before dispatch.
#[derive(Error, Debug, Clone)]
#[error("{role} file not found: {}", path.display())]
pub struct NotFoundError {
    pub role: &'static str,
    pub path: PathBuf,
}
