use crate::client::{ClientBuilder, ClientConfig, ClientCore};
use crate::decoder::{decode_image, deliver, deliver_blocking, ArtifactOutput};
use crate::errors::FoundryResult;
use crate::services::images::flux::{FluxPayload, FLUX_API_VERSION, FLUX_ROUTE};
use crate::services::images::{
    ImageEditRequest, ImageGenerationRequest, ImageModel, ImageRequestValidator,
};
use crate::transport::{HttpRequest, HttpTransport, MultipartPayload};
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;
use tracing::instrument;

/// Text-to-image and image edit, in both calling conventions.
///
/// Every operation returns the first image of the response, either as bytes or
/// written to the request's `output_file`.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate(&self, request: ImageGenerationRequest) -> FoundryResult<ArtifactOutput>;

    fn generate_blocking(&self, request: ImageGenerationRequest)
        -> FoundryResult<ArtifactOutput>;

    async fn edit(&self, request: ImageEditRequest) -> FoundryResult<ArtifactOutput>;

    fn edit_blocking(&self, request: ImageEditRequest) -> FoundryResult<ArtifactOutput>;
}

#[derive(Debug, Clone)]
pub struct ImageClient {
    core: ClientCore,
    model: ImageModel,
    output_format: Option<String>,
}

impl ImageClient {
    /// Client over the default reqwest transport.
    pub fn new(config: ClientConfig) -> FoundryResult<Self> {
        ClientBuilder::new().with_config(config).build_image_client()
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> FoundryResult<Self> {
        ClientBuilder::new()
            .with_config(config)
            .with_transport(transport)
            .build_image_client()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_core(core: ClientCore) -> Self {
        Self {
            core,
            model: ImageModel::default(),
            output_format: None,
        }
    }

    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    /// Output format forwarded to FLUX (`png`, `jpeg`).
    pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = Some(output_format.into());
        self
    }

    pub fn model(&self) -> ImageModel {
        self.model
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output_format.as_deref()
    }

    pub fn config(&self) -> &ClientConfig {
        self.core.config()
    }

    pub(crate) fn core(&self) -> &ClientCore {
        &self.core
    }

    fn deployment_request(&self, operation: &str) -> crate::transport::RequestBuilder {
        let config = self.core.config();
        self.core
            .request(
                Method::POST,
                &[
                    "openai",
                    "deployments",
                    config.deployment_name.as_str(),
                    "images",
                    operation,
                ],
            )
            .api_version(&config.api_version)
    }

    fn generation_request(&self, request: &ImageGenerationRequest) -> FoundryResult<HttpRequest> {
        ImageRequestValidator::validate_generation(request)?;
        match self.model {
            ImageModel::GptImage => self.deployment_request("generations").json(request)?.build(),
            ImageModel::Flux2Pro => {
                let payload = FluxPayload::generation(request, self.output_format())?;
                self.core
                    .request(Method::POST, &FLUX_ROUTE)
                    .api_version(FLUX_API_VERSION)
                    .json(&payload)?
                    .build()
            }
        }
    }

    /// Multipart body: image, mask, additional images, then the text fields.
    pub(crate) fn edit_payload(request: &ImageEditRequest) -> MultipartPayload {
        let mut payload = MultipartPayload::new().file("image", &request.image_path);
        if let Some(mask) = &request.mask_path {
            payload = payload.file("mask", mask);
        }
        for extra in &request.additional_image_paths {
            payload = payload.file("image", extra);
        }
        payload
            .text("prompt", request.prompt.as_str())
            .text("size", request.size.to_string())
            .text("quality", request.quality.as_str())
    }

    fn edit_request(&self, request: &ImageEditRequest) -> FoundryResult<HttpRequest> {
        self.deployment_request("edits")
            .multipart(Self::edit_payload(request))
            .build()
    }
}

#[async_trait]
impl ImageService for ImageClient {
    #[instrument(skip_all, fields(deployment = %self.config().deployment_name, model = ?self.model))]
    async fn generate(&self, request: ImageGenerationRequest) -> FoundryResult<ArtifactOutput> {
        let http_request = self.generation_request(&request)?;
        let response = self.core.execute(http_request).await?;
        let bytes = decode_image(&response.body)?;
        deliver(bytes, request.output_file.as_deref()).await
    }

    #[instrument(skip_all, fields(deployment = %self.config().deployment_name, model = ?self.model))]
    fn generate_blocking(
        &self,
        request: ImageGenerationRequest,
    ) -> FoundryResult<ArtifactOutput> {
        let http_request = self.generation_request(&request)?;
        let response = self.core.execute_blocking(http_request)?;
        let bytes = decode_image(&response.body)?;
        deliver_blocking(bytes, request.output_file.as_deref())
    }

    #[instrument(skip_all, fields(deployment = %self.config().deployment_name))]
    async fn edit(&self, request: ImageEditRequest) -> FoundryResult<ArtifactOutput> {
        ImageRequestValidator::validate_edit(&request)?;
        for (role, path) in request.input_files() {
            ImageRequestValidator::check_input_file(role, path, tokio::fs::metadata(path).await)?;
        }

        let http_request = self.edit_request(&request)?;
        let response = self.core.execute(http_request).await?;
        let bytes = decode_image(&response.body)?;
        deliver(bytes, request.output_file.as_deref()).await
    }

    #[instrument(skip_all, fields(deployment = %self.config().deployment_name))]
    fn edit_blocking(&self, request: ImageEditRequest) -> FoundryResult<ArtifactOutput> {
        ImageRequestValidator::validate_edit(&request)?;
        for (role, path) in request.input_files() {
            ImageRequestValidator::check_input_file(role, path, std::fs::metadata(path))?;
        }

        let http_request = self.edit_request(&request)?;
        let response = self.core.execute_blocking(http_request)?;
        let bytes = decode_image(&response.body)?;
        deliver_blocking(bytes, request.output_file.as_deref())
    }
}
