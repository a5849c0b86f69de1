//! Black Forest Labs FLUX.2 [pro] on the image deployment.
//!
//! FLUX takes a JSON body with explicit `width`/`height` and, for edits, up to
//! eight base64 reference images keyed `input_image`, `input_image_2`, ...

use crate::decoder::{decode_image, deliver, deliver_blocking, ArtifactOutput};
use crate::errors::{FoundryError, FoundryResult, ValidationError};
use crate::services::images::{
    ImageClient, ImageGenerationRequest, ImageModel, ImageRequestValidator, ImageSize,
};
use crate::transport::HttpRequest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use http::Method;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::instrument;

pub const FLUX_API_VERSION: &str = "preview";
pub(crate) const FLUX_ROUTE: [&str; 4] = ["providers", "blackforestlabs", "v1", "flux-2-pro"];

/// A FLUX reference image, read from disk or supplied in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FluxImage {
    Path(PathBuf),
    Bytes(Bytes),
}

#[derive(Debug, Clone)]
pub struct FluxEditRequest {
    pub prompt: String,
    pub images: Vec<FluxImage>,
    pub size: ImageSize,
    pub output_file: Option<PathBuf>,
}

impl FluxEditRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
            size: ImageSize::Square,
            output_file: None,
        }
    }

    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.images.push(FluxImage::Path(path.into()));
        self
    }

    pub fn with_image_bytes(mut self, bytes: impl Into<Bytes>) -> Self {
        self.images.push(FluxImage::Bytes(bytes.into()));
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FluxPayload<'a> {
    prompt: &'a str,
    model: &'static str,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_format: Option<&'a str>,
    #[serde(flatten)]
    input_images: BTreeMap<String, String>,
}

impl<'a> FluxPayload<'a> {
    pub(crate) fn generation(
        request: &'a ImageGenerationRequest,
        output_format: Option<&'a str>,
    ) -> FoundryResult<Self> {
        let (width, height) = flux_dimensions(request.size)?;
        Ok(Self {
            prompt: &request.prompt,
            model: ImageModel::Flux2Pro.model_id(),
            width,
            height,
            output_format,
            input_images: BTreeMap::new(),
        })
    }

    fn edit(
        request: &'a FluxEditRequest,
        output_format: Option<&'a str>,
        encoded: Vec<String>,
    ) -> FoundryResult<Self> {
        let (width, height) = flux_dimensions(request.size)?;
        let input_images = encoded
            .into_iter()
            .enumerate()
            .map(|(idx, data)| (input_image_key(idx), data))
            .collect();
        Ok(Self {
            prompt: &request.prompt,
            model: ImageModel::Flux2Pro.model_id(),
            width,
            height,
            output_format,
            input_images,
        })
    }
}

fn input_image_key(idx: usize) -> String {
    if idx == 0 {
        "input_image".to_string()
    } else {
        format!("input_image_{}", idx + 1)
    }
}

fn flux_dimensions(size: ImageSize) -> FoundryResult<(u32, u32)> {
    size.dimensions().ok_or_else(|| {
        FoundryError::Validation(ValidationError::InvalidParameter {
            parameter: "size".to_string(),
            reason: "FLUX requires explicit dimensions".to_string(),
        })
    })
}

fn read_error(path: &std::path::Path, err: std::io::Error) -> FoundryError {
    ImageRequestValidator::input_error("image", path, err)
}

impl ImageClient {
    fn require_flux(&self) -> FoundryResult<()> {
        if self.model() != ImageModel::Flux2Pro {
            return Err(FoundryError::Validation(ValidationError::InvalidParameter {
                parameter: "model".to_string(),
                reason: "flux_edit requires ImageModel::Flux2Pro".to_string(),
            }));
        }
        Ok(())
    }

    fn flux_edit_request(
        &self,
        request: &FluxEditRequest,
        encoded: Vec<String>,
    ) -> FoundryResult<HttpRequest> {
        let payload = FluxPayload::edit(request, self.output_format(), encoded)?;
        self.core()
            .request(Method::POST, &FLUX_ROUTE)
            .api_version(FLUX_API_VERSION)
            .json(&payload)?
            .build()
    }

    /// Edits with FLUX.2 using up to eight reference images.
    #[instrument(skip_all, fields(images = request.images.len()))]
    pub async fn flux_edit(&self, request: FluxEditRequest) -> FoundryResult<ArtifactOutput> {
        self.require_flux()?;
        ImageRequestValidator::validate_flux_edit(&request)?;
        flux_dimensions(request.size)?;

        let mut encoded = Vec::with_capacity(request.images.len());
        for image in &request.images {
            let raw = match image {
                FluxImage::Path(path) => Bytes::from(
                    tokio::fs::read(path)
                        .await
                        .map_err(|e| read_error(path, e))?,
                ),
                FluxImage::Bytes(bytes) => bytes.clone(),
            };
            encoded.push(STANDARD.encode(&raw));
        }

        let http_request = self.flux_edit_request(&request, encoded)?;
        let response = self.core().execute(http_request).await?;
        let bytes = decode_image(&response.body)?;
        deliver(bytes, request.output_file.as_deref()).await
    }

    #[instrument(skip_all, fields(images = request.images.len()))]
    pub fn flux_edit_blocking(&self, request: FluxEditRequest) -> FoundryResult<ArtifactOutput> {
        self.require_flux()?;
        ImageRequestValidator::validate_flux_edit(&request)?;
        flux_dimensions(request.size)?;

        let mut encoded = Vec::with_capacity(request.images.len());
        for image in &request.images {
            let raw = match image {
                FluxImage::Path(path) => {
                    Bytes::from(std::fs::read(path).map_err(|e| read_error(path, e))?)
                }
                FluxImage::Bytes(bytes) => bytes.clone(),
            };
            encoded.push(STANDARD.encode(&raw));
        }

        let http_request = self.flux_edit_request(&request, encoded)?;
        let response = self.core().execute_blocking(http_request)?;
        let bytes = decode_image(&response.body)?;
        deliver_blocking(bytes, request.output_file.as_deref())
    }
}
