//! Clients for Azure AI Foundry image (gpt-image-1, FLUX.2) and video (Sora)
//! generation, each callable from async code or from a plain thread.

pub mod auth;
pub mod client;
pub mod decoder;
pub mod errors;
pub mod services;
pub mod transport;
pub mod types;

#[cfg(test)]
pub mod mocks;
#[cfg(test)]
pub mod fixtures;

pub use auth::{
    AccessToken, ApiKeyAuth, AuthProvider, BearerTokenAuth, ClientSecretCredential,
    StaticTokenCredential, TokenCredential,
};
pub use client::{ClientBuilder, ClientConfig, ClientConfigBuilder, Credential, ServiceKind};
pub use decoder::ArtifactOutput;
pub use errors::{FoundryError, FoundryResult};

pub use services::{
    images::{
        FluxEditRequest, FluxImage, ImageClient, ImageEditRequest, ImageGenerationRequest,
        ImageModel, ImageQuality, ImageService, ImageSize,
    },
    video::{JobStatus, PollSettings, VideoClient, VideoGenerationRequest, VideoJob, VideoService},
};

pub mod prelude {
    pub use crate::client::{ClientConfig, ServiceKind};
    pub use crate::decoder::ArtifactOutput;
    pub use crate::errors::{FoundryError, FoundryResult};
    pub use crate::services::images::{
        ImageClient, ImageEditRequest, ImageGenerationRequest, ImageService,
    };
    pub use crate::services::video::{VideoClient, VideoGenerationRequest, VideoService};
}
