use crate::errors::{FoundryError, FoundryResult, ValidationError};
use crate::services::video::VideoGenerationRequest;

pub struct VideoRequestValidator;

impl VideoRequestValidator {
    pub fn validate(request: &VideoGenerationRequest) -> FoundryResult<()> {
        if request.prompt.trim().is_empty() {
            return Err(FoundryError::Validation(
                ValidationError::MissingRequiredField("prompt".to_string()),
            ));
        }

        for (field, value) in [
            ("n_variants", request.n_variants),
            ("n_seconds", request.n_seconds),
            ("height", request.height),
            ("width", request.width),
        ] {
            if value == 0 {
                return Err(FoundryError::Validation(ValidationError::InvalidParameter {
                    parameter: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                }));
            }
        }

        Ok(())
    }
}
