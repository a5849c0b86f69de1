mod config;
mod client_core;
mod factory;

pub use client_core::ClientCore;
pub use config::{
    ClientConfig, ClientConfigBuilder, Credential, ServiceKind, DEFAULT_IMAGE_API_VERSION,
    DEFAULT_IMAGE_DEPLOYMENT, DEFAULT_VIDEO_API_VERSION, DEFAULT_VIDEO_DEPLOYMENT,
};
pub use factory::ClientBuilder;
