mod job;
mod service;
mod types;
mod validation;


pub use job::{PollSettings, DEFAULT_JOB_TIMEOUT, DEFAULT_POLL_INTERVAL};
pub use service::{VideoClient, VideoService};
pub use types::{JobErrorDetail, JobStatus, VideoGeneration, VideoGenerationRequest, VideoJob};
pub(crate) use types::VideoJobPayload;
pub use validation::VideoRequestValidator;
