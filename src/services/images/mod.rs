mod flux;
mod service;
mod types;
mod validation;


pub use flux::{FluxEditRequest, FluxImage, FLUX_API_VERSION};
pub use service::{ImageClient, ImageService};
pub use types::{
    ImageEditRequest, ImageGenerationRequest, ImageModel, ImageQuality, ImageSize,
};
pub use validation::{ImageRequestValidator, MAX_FLUX_INPUT_IMAGES, MAX_IMAGES_PER_REQUEST};
