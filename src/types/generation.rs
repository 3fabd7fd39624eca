//! Image generation types.
//!
//! Options are collected in [`GenerationOptions`], where every field is
//! optional, and merged against the default table by
//! [`GenerationOptions::resolve`]. The step default depends on the mode:
//! pure text generation uses 20 steps, image-conditioned generation 10.

use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::StabilityResult;

/// Default prompt adherence strength.
pub const DEFAULT_CFG_SCALE: f64 = 7.0;

/// Default image height in pixels.
pub const DEFAULT_HEIGHT: u32 = 512;

/// Default image width in pixels.
pub const DEFAULT_WIDTH: u32 = 512;

/// Default number of images to produce.
pub const DEFAULT_SAMPLES: u32 = 1;

/// Default step count for text-to-image.
pub const TEXT_TO_IMAGE_DEFAULT_STEPS: u32 = 20;

/// Default step count when an initial image is supplied.
pub const IMAGE_TO_IMAGE_DEFAULT_STEPS: u32 = 10;

/// Default strength of the initial image.
pub const DEFAULT_IMAGE_STRENGTH: f64 = 0.35;

/// Guidance strategy applied during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClipGuidancePreset {
    /// Fast, blue variant (default).
    #[default]
    FastBlue,
    /// Fast, green variant.
    FastGreen,
    /// No guidance.
    None,
    /// Simple guidance.
    Simple,
    /// Slow guidance.
    Slow,
    /// Slower guidance.
    Slower,
    /// Slowest guidance.
    Slowest,
}

impl ClipGuidancePreset {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastBlue => "FAST_BLUE",
            Self::FastGreen => "FAST_GREEN",
            Self::None => "NONE",
            Self::Simple => "SIMPLE",
            Self::Slow => "SLOW",
            Self::Slower => "SLOWER",
            Self::Slowest => "SLOWEST",
        }
    }
}

/// Sampling algorithm used during diffusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sampler {
    /// DDIM.
    #[serde(rename = "DDIM")]
    Ddim,
    /// DDPM.
    #[serde(rename = "DDPM")]
    Ddpm,
    /// DPM++ 2M.
    #[serde(rename = "K_DPMPP_2M")]
    KDpmpp2M,
    /// DPM++ 2S ancestral.
    #[serde(rename = "K_DPMPP_2S_ANCESTRAL")]
    KDpmpp2SAncestral,
    /// DPM 2.
    #[serde(rename = "K_DPM_2")]
    KDpm2,
    /// DPM 2 ancestral.
    #[serde(rename = "K_DPM_2_ANCESTRAL")]
    KDpm2Ancestral,
    /// Euler.
    #[serde(rename = "K_EULER")]
    KEuler,
    /// Euler ancestral.
    #[serde(rename = "K_EULER_ANCESTRAL")]
    KEulerAncestral,
    /// Heun.
    #[serde(rename = "K_HEUN")]
    KHeun,
    /// LMS.
    #[serde(rename = "K_LMS")]
    KLms,
}

impl Sampler {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ddim => "DDIM",
            Self::Ddpm => "DDPM",
            Self::KDpmpp2M => "K_DPMPP_2M",
            Self::KDpmpp2SAncestral => "K_DPMPP_2S_ANCESTRAL",
            Self::KDpm2 => "K_DPM_2",
            Self::KDpm2Ancestral => "K_DPM_2_ANCESTRAL",
            Self::KEuler => "K_EULER",
            Self::KEulerAncestral => "K_EULER_ANCESTRAL",
            Self::KHeun => "K_HEUN",
            Self::KLms => "K_LMS",
        }
    }
}

/// Which image or channel encodes the inpainting mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaskSource {
    /// White pixels of the mask image are regenerated (default).
    #[default]
    MaskImageWhite,
    /// Black pixels of the mask image are regenerated.
    MaskImageBlack,
    /// Transparent pixels of the initial image are regenerated.
    InitImageAlpha,
}

impl MaskSource {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaskImageWhite => "MASK_IMAGE_WHITE",
            Self::MaskImageBlack => "MASK_IMAGE_BLACK",
            Self::InitImageAlpha => "INIT_IMAGE_ALPHA",
        }
    }
}

/// Why generation stopped for a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Image generated.
    Success,
    /// Generation failed.
    Error,
    /// The image was blocked by the content filter.
    ContentFiltered,
}

/// Generation options; unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    /// Prompt adherence strength (default 7).
    pub cfg_scale: Option<f64>,
    /// Guidance preset (default `FAST_BLUE`).
    pub clip_guidance_preset: Option<ClipGuidancePreset>,
    /// Height in pixels (default 512). Expected to be a multiple of 64.
    pub height: Option<u32>,
    /// Width in pixels (default 512). Expected to be a multiple of 64.
    pub width: Option<u32>,
    /// Number of images (default 1).
    pub samples: Option<u32>,
    /// Diffusion steps (default depends on the mode).
    pub steps: Option<u32>,
    /// Sampler; the engine default is used when unset.
    pub sampler: Option<Sampler>,
}

impl GenerationOptions {
    /// Creates options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prompt adherence strength.
    pub fn cfg_scale(mut self, cfg_scale: f64) -> Self {
        self.cfg_scale = Some(cfg_scale);
        self
    }

    /// Sets the guidance preset.
    pub fn clip_guidance_preset(mut self, preset: ClipGuidancePreset) -> Self {
        self.clip_guidance_preset = Some(preset);
        self
    }

    /// Sets the height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets width and height.
    pub fn size(self, width: u32, height: u32) -> Self {
        self.width(width).height(height)
    }

    /// Sets the number of samples.
    pub fn samples(mut self, samples: u32) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Sets the step count.
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the sampler.
    pub fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Merges the options against the default table.
    pub fn resolve(&self, default_steps: u32) -> ResolvedOptions {
        ResolvedOptions {
            cfg_scale: self.cfg_scale.unwrap_or(DEFAULT_CFG_SCALE),
            clip_guidance_preset: self.clip_guidance_preset.unwrap_or_default(),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            samples: self.samples.unwrap_or(DEFAULT_SAMPLES),
            steps: self.steps.unwrap_or(default_steps),
            sampler: self.sampler,
        }
    }
}

/// Options with every default applied, as sent on the wire.
///
/// In JSON bodies an unset sampler serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOptions {
    /// Prompt adherence strength.
    pub cfg_scale: f64,
    /// Guidance preset.
    pub clip_guidance_preset: ClipGuidancePreset,
    /// Height in pixels.
    pub height: u32,
    /// Width in pixels.
    pub width: u32,
    /// Number of images.
    pub samples: u32,
    /// Diffusion steps.
    pub steps: u32,
    /// Sampler.
    pub sampler: Option<Sampler>,
}

impl ResolvedOptions {
    /// Returns the options as multipart text fields.
    ///
    /// An unset sampler is left out entirely.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("cfg_scale", self.cfg_scale.to_string()),
            ("clip_guidance_preset", self.clip_guidance_preset.as_str().to_string()),
            ("height", self.height.to_string()),
            ("width", self.width.to_string()),
            ("samples", self.samples.to_string()),
            ("steps", self.steps.to_string()),
        ];
        if let Some(sampler) = self.sampler {
            fields.push(("sampler", sampler.as_str().to_string()));
        }
        fields
    }
}

/// A single text prompt entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPrompt {
    /// Prompt text.
    pub text: String,
}

/// JSON body of a text-to-image request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToImageBody {
    /// Prompt entries; only one is ever sent.
    pub text_prompts: Vec<TextPrompt>,
    /// Flattened options.
    #[serde(flatten)]
    pub options: ResolvedOptions,
}

/// Text-to-image request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextToImageRequest {
    /// Engine ID.
    pub engine_id: String,
    /// Prompt text, forwarded as-is.
    pub prompt: String,
    /// Generation options.
    pub options: GenerationOptions,
}

impl TextToImageRequest {
    /// Creates a new request with default options.
    pub fn new(engine_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            prompt: prompt.into(),
            options: GenerationOptions::default(),
        }
    }

    /// Sets the generation options.
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the JSON body.
    pub fn body(&self) -> TextToImageBody {
        TextToImageBody {
            text_prompts: vec![TextPrompt {
                text: self.prompt.clone(),
            }],
            options: self.options.resolve(TEXT_TO_IMAGE_DEFAULT_STEPS),
        }
    }
}

/// Image-to-image request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageToImageRequest {
    /// Engine ID.
    pub engine_id: String,
    /// Prompt text, forwarded as-is.
    pub prompt: String,
    /// Initial image bytes (PNG).
    pub init_image: Vec<u8>,
    /// How strongly the initial image constrains the output, 0 to 1.
    /// Values outside that range are sent unchanged.
    pub image_strength: f64,
    /// Generation options.
    pub options: GenerationOptions,
}

impl ImageToImageRequest {
    /// Creates a new request with the default image strength and options.
    pub fn new(
        engine_id: impl Into<String>,
        prompt: impl Into<String>,
        init_image: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            prompt: prompt.into(),
            init_image: init_image.into(),
            image_strength: DEFAULT_IMAGE_STRENGTH,
            options: GenerationOptions::default(),
        }
    }

    /// Sets the image strength.
    pub fn image_strength(mut self, image_strength: f64) -> Self {
        self.image_strength = image_strength;
        self
    }

    /// Sets the generation options.
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Image-to-image request with an inpainting mask.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageToImageMaskingRequest {
    /// Engine ID.
    pub engine_id: String,
    /// Prompt text, forwarded as-is.
    pub prompt: String,
    /// Initial image bytes (PNG).
    pub init_image: Vec<u8>,
    /// Mask image bytes (PNG).
    pub mask_image: Vec<u8>,
    /// Where the mask is read from.
    pub mask_source: MaskSource,
    /// Generation options.
    pub options: GenerationOptions,
}

impl ImageToImageMaskingRequest {
    /// Creates a new request with the default mask source and options.
    pub fn new(
        engine_id: impl Into<String>,
        prompt: impl Into<String>,
        init_image: impl Into<Vec<u8>>,
        mask_image: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            prompt: prompt.into(),
            init_image: init_image.into(),
            mask_image: mask_image.into(),
            mask_source: MaskSource::default(),
            options: GenerationOptions::default(),
        }
    }

    /// Sets the mask source.
    pub fn mask_source(mut self, mask_source: MaskSource) -> Self {
        self.mask_source = mask_source;
        self
    }

    /// Sets the generation options.
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationArtifact {
    /// Base64-encoded image data.
    pub base64: String,
    /// Seed used for this sample.
    pub seed: u64,
    /// Why generation stopped.
    #[serde(rename = "finishReason")]
    pub finish_reason: FinishReason,
}

impl GenerationArtifact {
    /// Decodes the base64 payload into raw image bytes.
    pub fn decode(&self) -> StabilityResult<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.base64)?)
    }

    /// Returns true if the sample finished successfully.
    pub fn is_success(&self) -> bool {
        self.finish_reason == FinishReason::Success
    }
}

/// Artifact-mode generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// One artifact per sample, in the order returned.
    pub artifacts: Vec<GenerationArtifact>,
}

impl GenerationResponse {
    /// Returns the number of artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if there are no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Returns an iterator over the artifacts.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationArtifact> {
        self.artifacts.iter()
    }

    /// Returns the artifacts that finished successfully.
    pub fn successful(&self) -> Vec<&GenerationArtifact> {
        self.artifacts.iter().filter(|a| a.is_success()).collect()
    }

    /// Decodes every artifact, stopping at the first invalid payload.
    pub fn decode_all(&self) -> StabilityResult<Vec<Vec<u8>>> {
        self.artifacts.iter().map(GenerationArtifact::decode).collect()
    }
}

/// Binary-mode generation response: a single PNG, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage(Bytes);

impl PngImage {
    /// Wraps raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Returns the image bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the image, returning the bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns the size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the body was empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for PngImage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for PngImage {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}
