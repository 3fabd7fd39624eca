//! Stability AI Client Library
//!
//! An async Rust client for the Stability image generation REST API. Covers
//! engine listing, account and credit lookups, and the three generation modes:
//! text-to-image, image-to-image and masked image-to-image (inpainting).
//!
//! # Features
//!
//! - **Generation**: JSON artifact responses or raw PNG bodies for every mode
//! - **Typed options**: Samplers, CLIP guidance presets and mask sources as enums
//! - **Account**: Engine list, account details and credit balance per organization
//! - **Observability**: `tracing` spans per call and a redacting request logger
//! - **Testability**: Pluggable transport and auth, with mocks behind the `mocks` feature
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stability_client::{GenerationOptions, StabilityClient, TextToImageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StabilityClient::from_env()?;
//!
//!     let request = TextToImageRequest::new("stable-diffusion-512-v2-1", "a red apple")
//!         .options(GenerationOptions::new().samples(2).steps(30));
//!
//!     let response = client.generation().text_to_image(request).await?;
//!     for (i, image) in response.decode_all()?.into_iter().enumerate() {
//!         std::fs::write(format!("apple-{}.png", i), image)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Inpainting Example
//!
//! ```rust,no_run
//! use stability_client::{ImageToImageMaskingRequest, MaskSource, StabilityClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StabilityClient::from_env()?;
//!
//!     let request = ImageToImageMaskingRequest::new(
//!         "stable-inpainting-512-v2-0",
//!         "a wooden door",
//!         std::fs::read("house.png")?,
//!         std::fs::read("door-mask.png")?,
//!     )
//!     .mask_source(MaskSource::MaskImageWhite);
//!
//!     let png = client.generation().image_to_image_masking_png(request).await?;
//!     std::fs::write("house-with-door.png", png.as_bytes())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{StabilityClient, StabilityClientBuilder};
pub use config::StabilityConfig;
pub use errors::{StabilityError, StabilityResult};

// Type re-exports
pub use types::engines::{known as known_engines, Engine};
pub use types::generation::{
    ClipGuidancePreset, FinishReason, GenerationArtifact, GenerationOptions, GenerationResponse,
    ImageToImageMaskingRequest, ImageToImageRequest, MaskSource, PngImage, Sampler,
    TextToImageRequest,
};
pub use types::user::{Account, Balance, OrganizationMembership, OrganizationRole};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
