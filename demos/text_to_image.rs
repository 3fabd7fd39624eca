//! Text-to-image example.
//!
//! Lists the engines, prints the remaining credits and writes one PNG per
//! generated sample to the current directory.
//!
//! Run with:
//! ```bash
//! STABILITY_API_KEY=sk-... cargo run --example text_to_image -- "a red apple on a table"
//! ```

use stability_client::observability::{init_tracing, LogConfig};
use stability_client::{
    known_engines, ClipGuidancePreset, GenerationOptions, StabilityClient, TextToImageRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&LogConfig::default())?;

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "a red apple".to_string());

    let client = StabilityClient::from_env()?;

    println!("=== Engines ===");
    for engine in client.engines().list().await? {
        println!("{:<32} {}", engine.id, engine.name);
    }

    let balance = client.user().balance(None).await?;
    println!("\nCredits before: {:.2}", balance.credits);

    let options = GenerationOptions::new()
        .samples(2)
        .steps(30)
        .clip_guidance_preset(ClipGuidancePreset::FastGreen);
    let request =
        TextToImageRequest::new(known_engines::STABLE_DIFFUSION_512_V2_1, &prompt).options(options);

    println!("\nGenerating \"{}\"...", prompt);
    let response = client.generation().text_to_image(request).await?;

    for artifact in response.iter() {
        if !artifact.is_success() {
            println!("seed {}: {:?}", artifact.seed, artifact.finish_reason);
            continue;
        }
        let file = format!("{}.png", artifact.seed);
        std::fs::write(&file, artifact.decode()?)?;
        println!("seed {}: wrote {}", artifact.seed, file);
    }

    let balance = client.user().balance(None).await?;
    println!("\nCredits after: {:.2}", balance.credits);

    Ok(())
}
