use crate::errors::{FoundryError, FoundryResult, NotFoundError, ValidationError};
use crate::services::images::{FluxEditRequest, ImageEditRequest, ImageGenerationRequest};
use std::fs::Metadata;
use std::io::{self, ErrorKind};
use std::path::Path;

pub const MAX_IMAGES_PER_REQUEST: u32 = 10;
pub const MAX_FLUX_INPUT_IMAGES: usize = 8;

pub struct ImageRequestValidator;

impl ImageRequestValidator {
    pub fn validate_generation(request: &ImageGenerationRequest) -> FoundryResult<()> {
        Self::require_prompt(&request.prompt)?;

        if request.n == 0 || request.n > MAX_IMAGES_PER_REQUEST {
            return Err(FoundryError::Validation(ValidationError::ValueOutOfRange {
                field: "n".to_string(),
                min: "1".to_string(),
                max: MAX_IMAGES_PER_REQUEST.to_string(),
                value: request.n.to_string(),
            }));
        }

        Ok(())
    }

    pub fn validate_edit(request: &ImageEditRequest) -> FoundryResult<()> {
        Self::require_prompt(&request.prompt)
    }

    pub fn validate_flux_edit(request: &FluxEditRequest) -> FoundryResult<()> {
        Self::require_prompt(&request.prompt)?;

        let count = request.images.len();
        if count == 0 || count > MAX_FLUX_INPUT_IMAGES {
            return Err(FoundryError::Validation(ValidationError::ValueOutOfRange {
                field: "images".to_string(),
                min: "1".to_string(),
                max: MAX_FLUX_INPUT_IMAGES.to_string(),
                value: count.to_string(),
            }));
        }

        Ok(())
    }

    /// Maps the result of a metadata lookup for an input file.
    pub fn check_input_file(
        role: &'static str,
        path: &Path,
        metadata: io::Result<Metadata>,
    ) -> FoundryResult<()> {
        match metadata {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(Self::not_found(role, path)),
            Err(e) => Err(Self::input_error(role, path, e)),
        }
    }

    /// Error for an input file that could not be opened or read.
    pub fn input_error(role: &'static str, path: &Path, err: io::Error) -> FoundryError {
        if err.kind() == ErrorKind::NotFound {
            Self::not_found(role, path)
        } else {
            FoundryError::io(path, err)
        }
    }

    fn not_found(role: &'static str, path: &Path) -> FoundryError {
        tracing::warn!(role, path = %path.display(), "input file missing");
        FoundryError::NotFound(NotFoundError {
            role,
            path: path.to_path_buf(),
        })
    }

    fn require_prompt(prompt: &str) -> FoundryResult<()> {
        if prompt.trim().is_empty() {
            return Err(FoundryError::Validation(
                ValidationError::MissingRequiredField("prompt".to_string()),
            ));
        }
        Ok(())
    }
}
