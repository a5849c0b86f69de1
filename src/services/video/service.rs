use crate::client::{ClientBuilder, ClientConfig, ClientCore};
use crate::decoder::{deliver, deliver_blocking, ArtifactOutput};
use crate::errors::{DecodeError, FoundryResult};
use crate::services::video::job::{evaluate, timed_out, PollOutcome, PollSettings};
use crate::services::video::{
    VideoGenerationRequest, VideoJob, VideoJobPayload, VideoRequestValidator,
};
use crate::transport::{HttpRequest, HttpTransport, RequestBuilder, ResponseParser};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const VIDEO_ROUTE: [&str; 4] = ["openai", "v1", "video", "generations"];

/// Text-to-video in both calling conventions.
///
/// A call submits a job, polls it until it reaches a terminal state and
/// downloads the first generation.
#[async_trait]
pub trait VideoService: Send + Sync {
    async fn generate(&self, request: VideoGenerationRequest) -> FoundryResult<ArtifactOutput>;

    fn generate_blocking(&self, request: VideoGenerationRequest)
        -> FoundryResult<ArtifactOutput>;
}

#[derive(Debug, Clone)]
pub struct VideoClient {
    core: ClientCore,
    polling: PollSettings,
}

impl VideoClient {
    pub fn new(config: ClientConfig) -> FoundryResult<Self> {
        ClientBuilder::new().with_config(config).build_video_client()
    }

    /// Reads `SORA_ENDPOINT_URL`, `SORA_DEPLOYMENT_NAME` and `AZURE_OPENAI_API_KEY`.
    pub fn from_env() -> FoundryResult<Self> {
        ClientBuilder::new().build_video_client()
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> FoundryResult<Self> {
        ClientBuilder::new()
            .with_config(config)
            .with_transport(transport)
            .build_video_client()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_core(core: ClientCore) -> Self {
        Self {
            core,
            polling: PollSettings::default(),
        }
    }

    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.polling = PollSettings { interval, timeout };
        self
    }

    pub fn polling(&self) -> PollSettings {
        self.polling
    }

    pub fn config(&self) -> &ClientConfig {
        self.core.config()
    }

    fn route(&self, method: Method, tail: &[&str]) -> RequestBuilder {
        let mut segments: Vec<&str> = VIDEO_ROUTE.to_vec();
        segments.extend_from_slice(tail);
        self.core
            .request(method, &segments)
            .api_version(&self.core.config().api_version)
    }

    fn create_job_request(&self, request: &VideoGenerationRequest) -> FoundryResult<HttpRequest> {
        VideoRequestValidator::validate(request)?;
        let payload = VideoJobPayload {
            request,
            model: &self.core.config().deployment_name,
        };
        self.route(Method::POST, &["jobs"]).json(&payload)?.build()
    }

    fn job_request(&self, job_id: &str) -> FoundryResult<HttpRequest> {
        self.route(Method::GET, &["jobs", job_id]).build()
    }

    fn content_request(&self, generation_id: &str) -> FoundryResult<HttpRequest> {
        self.route(Method::GET, &[generation_id, "content", "video"])
            .build()
    }

    fn parse_job(body: &[u8]) -> FoundryResult<VideoJob> {
        let job: VideoJob = ResponseParser::parse_json(body)?;
        if job.id.trim().is_empty() {
            return Err(DecodeError::MissingField("id".to_string()).into());
        }
        Ok(job)
    }

    /// Current state of a job.
    pub async fn get_job(&self, job_id: &str) -> FoundryResult<VideoJob> {
        let response = self.core.execute(self.job_request(job_id)?).await?;
        Self::parse_job(&response.body)
    }

    pub fn get_job_blocking(&self, job_id: &str) -> FoundryResult<VideoJob> {
        let response = self.core.execute_blocking(self.job_request(job_id)?)?;
        Self::parse_job(&response.body)
    }

    async fn submit(&self, request: &VideoGenerationRequest) -> FoundryResult<String> {
        let response = self.core.execute(self.create_job_request(request)?).await?;
        let job = Self::parse_job(&response.body)?;
        tracing::info!(job_id = %job.id, "video job created");
        Ok(job.id)
    }

    fn submit_blocking(&self, request: &VideoGenerationRequest) -> FoundryResult<String> {
        let response = self.core.execute_blocking(self.create_job_request(request)?)?;
        let job = Self::parse_job(&response.body)?;
        tracing::info!(job_id = %job.id, "video job created");
        Ok(job.id)
    }

    async fn wait_for_generation(&self, job_id: &str) -> FoundryResult<String> {
        let started = tokio::time::Instant::now();
        loop {
            let job = self.get_job(job_id).await?;
            if let PollOutcome::Ready(generation_id) = evaluate(job_id, &job)? {
                return Ok(generation_id);
            }
            let delay = self
                .polling
                .next_delay(started.elapsed())
                .ok_or_else(|| timed_out(job_id, &self.polling))?;
            tokio::time::sleep(delay).await;
        }
    }

    fn wait_for_generation_blocking(&self, job_id: &str) -> FoundryResult<String> {
        let started = std::time::Instant::now();
        loop {
            let job = self.get_job_blocking(job_id)?;
            if let PollOutcome::Ready(generation_id) = evaluate(job_id, &job)? {
                return Ok(generation_id);
            }
            let delay = self
                .polling
                .next_delay(started.elapsed())
                .ok_or_else(|| timed_out(job_id, &self.polling))?;
            std::thread::sleep(delay);
        }
    }

    async fn download(&self, generation_id: &str) -> FoundryResult<Bytes> {
        let response = self.core.execute(self.content_request(generation_id)?).await?;
        tracing::debug!(generation_id, bytes = response.body.len(), "video downloaded");
        Ok(response.body)
    }

    fn download_blocking(&self, generation_id: &str) -> FoundryResult<Bytes> {
        let response = self
            .core
            .execute_blocking(self.content_request(generation_id)?)?;
        tracing::debug!(generation_id, bytes = response.body.len(), "video downloaded");
        Ok(response.body)
    }
}

#[async_trait]
impl VideoService for VideoClient {
    #[instrument(skip_all, fields(deployment = %self.config().deployment_name))]
    async fn generate(&self, request: VideoGenerationRequest) -> FoundryResult<ArtifactOutput> {
        let job_id = self.submit(&request).await?;
        let generation_id = self.wait_for_generation(&job_id).await?;
        let bytes = self.download(&generation_id).await?;
        deliver(bytes, request.output_file.as_deref()).await
    }

    #[instrument(skip_all, fields(deployment = %self.config().deployment_name))]
    fn generate_blocking(
        &self,
        request: VideoGenerationRequest,
    ) -> FoundryResult<ArtifactOutput> {
        let job_id = self.submit_blocking(&request)?;
        let generation_id = self.wait_for_generation_blocking(&job_id)?;
        let bytes = self.download_blocking(&generation_id)?;
        deliver_blocking(bytes, request.output_file.as_deref())
    }
}
