use crate::types::{as_display_string, option_string};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct VideoGenerationRequest {
    pub prompt: String,
    #[serde(serialize_with = "as_display_string")]
    pub n_variants: u32,
    #[serde(serialize_with = "as_display_string")]
    pub n_seconds: u32,
    #[serde(serialize_with = "as_display_string")]
    pub height: u32,
    #[serde(serialize_with = "as_display_string")]
    pub width: u32,
    #[serde(skip)]
    pub output_file: Option<PathBuf>,
}

impl VideoGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n_variants: 1,
            n_seconds: 5,
            height: 1080,
            width: 1920,
            output_file: None,
        }
    }

    pub fn with_variants(mut self, n_variants: u32) -> Self {
        self.n_variants = n_variants;
        self
    }

    pub fn with_duration(mut self, n_seconds: u32) -> Self {
        self.n_seconds = n_seconds;
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

/// Job creation body: the request plus the deployment as `model`.
#[derive(Debug, Serialize)]
pub(crate) struct VideoJobPayload<'a> {
    #[serde(flatten)]
    pub request: &'a VideoGenerationRequest,
    pub model: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Preprocessing,
    Running,
    Processing,
    Succeeded,
    Failed,
    Cancelled,
    Expired,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::Cancelled | JobStatus::Expired
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Queued => "queued",
            JobStatus::Preprocessing => "preprocessing",
            JobStatus::Running => "running",
            JobStatus::Processing => "processing",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Expired => "expired",
            JobStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoJob {
    pub id: String,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub generations: Vec<VideoGeneration>,
    #[serde(default, with = "option_string")]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub error: Option<JobErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoGeneration {
    pub id: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub n_seconds: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobErrorDetail {
    #[serde(default, with = "option_string")]
    pub code: Option<String>,
    #[serde(default, with = "option_string")]
    pub message: Option<String>,
}
