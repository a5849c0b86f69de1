//! Example: Sora video generation from a plain thread
//!
//! ## Usage
//!
//! ```bash
//! export SORA_ENDPOINT_URL=https://my-resource.openai.azure.com
//! export AZURE_OPENAI_API_KEY=...
//! cargo run --example generate_video -- "A paper boat drifting down a rainy street"
//! ```

use integrations_foundry_media::{VideoClient, VideoGenerationRequest, VideoService};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("integrations_foundry_media=info")),
        )
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "A paper boat drifting down a rainy street".to_string());

    let client = VideoClient::from_env()?
        .with_polling(Duration::from_secs(5), Duration::from_secs(20 * 60));
    println!(
        "Submitting to deployment {}",
        client.config().deployment_name
    );

    let request = VideoGenerationRequest::new(prompt)
        .with_duration(5)
        .with_resolution(1280, 720)
        .with_output_file("boat.mp4");
    let result = client.generate_blocking(request)?;

    if let Some(path) = result.saved_path() {
        println!("Saved video to {}", path.display());
    }

    Ok(())
}
