//! Example: Image generation and editing with gpt-image-1
//!
//! ## Usage
//!
//! ```bash
//! export AZURE_API_KEY=...
//! export FOUNDRY_ENDPOINT=https://my-resource.openai.azure.com
//! cargo run --example generate_image -- "A lighthouse at dusk" out/lighthouse.png
//! ```
//!
//! Pass a third argument to edit that image instead of generating a new one.

use integrations_foundry_media::{
    ClientConfig, ImageClient, ImageEditRequest, ImageGenerationRequest, ImageQuality,
    ImageService, ImageSize, ServiceKind,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("integrations_foundry_media=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let prompt = args
        .next()
        .unwrap_or_else(|| "A lighthouse at dusk, oil painting".to_string());
    let output = args.next().unwrap_or_else(|| "lighthouse.png".to_string());
    let edit_source = args.next();

    let config = ClientConfig::builder(ServiceKind::Images)
        .endpoint(std::env::var("FOUNDRY_ENDPOINT")?)
        .build()?;
    let client = ImageClient::new(config)?;

    let result = match edit_source {
        Some(source) => {
            let request = ImageEditRequest::new(source, prompt).with_output_file(&output);
            client.edit(request).await?
        }
        None => {
            let request = ImageGenerationRequest::new(prompt)
                .with_size(ImageSize::Landscape)
                .with_quality(ImageQuality::High)
                .with_output_file(&output);
            client.generate(request).await?
        }
    };

    if let Some(path) = result.saved_path() {
        println!("Saved image to {}", path.display());
    }

    Ok(())
}
