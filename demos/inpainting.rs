//! Inpainting example.
//!
//! Regenerates the white region of a mask over an initial image and writes
//! the resulting PNG.
//!
//! Run with:
//! ```bash
//! STABILITY_API_KEY=sk-... cargo run --example inpainting -- init.png mask.png "a wooden door"
//! ```

use stability_client::config::API_KEY_ENV;
use stability_client::observability::{init_tracing, LogConfig, LogLevel};
use stability_client::{
    known_engines, GenerationOptions, ImageToImageMaskingRequest, MaskSource, StabilityClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&LogConfig::default())?;

    let mut args = std::env::args().skip(1);
    let (Some(init_path), Some(mask_path)) = (args.next(), args.next()) else {
        eprintln!("usage: inpainting <init.png> <mask.png> [prompt]");
        std::process::exit(2);
    };
    let prompt = args.next().unwrap_or_else(|| "a wooden door".to_string());

    let client = StabilityClient::builder()
        .api_key_from_env(API_KEY_ENV)?
        .log_config(LogConfig::new().level(LogLevel::Debug))
        .build()?;

    let account = client.user().account().await?;
    let organization = account.default_organization().map(|o| o.id.clone());
    if let Some(org) = &organization {
        let balance = client.user().balance(Some(org.as_str())).await?;
        println!("Organization {} has {:.2} credits", org, balance.credits);
    }

    let request = ImageToImageMaskingRequest::new(
        known_engines::STABLE_INPAINTING_512_V2_0,
        prompt,
        std::fs::read(&init_path)?,
        std::fs::read(&mask_path)?,
    )
    .mask_source(MaskSource::MaskImageWhite)
    .options(GenerationOptions::new().steps(40).cfg_scale(8.0));

    let png = client.generation().image_to_image_masking_png(request).await?;
    std::fs::write("inpainted.png", png.as_bytes())?;
    println!("Wrote inpainted.png ({} bytes)", png.len());

    Ok(())
}
