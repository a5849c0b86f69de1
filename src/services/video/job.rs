use crate::errors::{FoundryResult, JobError};
use crate::services::video::{JobStatus, VideoJob};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(1800);

/// How often a job is polled and how long it may take overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_JOB_TIMEOUT,
        }
    }
}

impl PollSettings {
    /// Time to wait before the next poll, or `None` once the deadline has passed.
    pub(crate) fn next_delay(&self, elapsed: Duration) -> Option<Duration> {
        let remaining = self.timeout.checked_sub(elapsed)?;
        if remaining.is_zero() {
            return None;
        }
        Some(self.interval.min(remaining))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollOutcome {
    Pending,
    /// Succeeded; carries the generation to download.
    Ready(String),
}

/// Classifies one status snapshot of `job_id`.
pub(crate) fn evaluate(job_id: &str, job: &VideoJob) -> FoundryResult<PollOutcome> {
    let status = job.status.unwrap_or(JobStatus::Unknown);
    tracing::info!(job_id, status = %status, "video job status");

    match status {
        JobStatus::Succeeded => {
            let generation = job
                .generations
                .first()
                .ok_or_else(|| JobError::NoGenerations(job_id.to_string()))?;
            Ok(PollOutcome::Ready(generation.id.clone()))
        }
        JobStatus::Failed => {
            let message = job
                .error
                .as_ref()
                .and_then(|e| e.message.clone())
                .or_else(|| job.failure_reason.clone())
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(JobError::Failed {
                job_id: job_id.to_string(),
                message,
            }
            .into())
        }
        JobStatus::Cancelled | JobStatus::Expired => Err(JobError::Terminated {
            job_id: job_id.to_string(),
            status: status.to_string(),
        }
        .into()),
        _ => Ok(PollOutcome::Pending),
    }
}

pub(crate) fn timed_out(job_id: &str, settings: &PollSettings) -> JobError {
    tracing::warn!(job_id, timeout = ?settings.timeout, "video job deadline exceeded");
    JobError::Timeout {
        job_id: job_id.to_string(),
        timeout: settings.timeout,
    }
}
