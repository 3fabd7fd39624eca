//! Engine types.

use serde::{Deserialize, Serialize};

/// A remote model configuration able to service generation requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Engine {
    /// Engine ID, used in generation paths.
    pub id: String,

    /// Human readable description.
    pub description: String,

    /// Display name.
    pub name: String,

    /// Engine type (e.g. `PICTURE`).
    #[serde(rename = "type")]
    pub engine_type: String,
}

/// Well-known engine IDs.
///
/// This list may lag behind the service; `EnginesService::list` is authoritative.
pub mod known {
    /// Stable Diffusion v1.
    pub const STABLE_DIFFUSION_V1: &str = "stable-diffusion-v1";

    /// Stable Diffusion v1.5.
    pub const STABLE_DIFFUSION_V1_5: &str = "stable-diffusion-v1-5";

    /// Stable Diffusion v2.0, 512px.
    pub const STABLE_DIFFUSION_512_V2_0: &str = "stable-diffusion-512-v2-0";

    /// Stable Diffusion v2.0, 768px.
    pub const STABLE_DIFFUSION_768_V2_0: &str = "stable-diffusion-768-v2-0";

    /// Stable Diffusion v2.1, 512px.
    pub const STABLE_DIFFUSION_512_V2_1: &str = "stable-diffusion-512-v2-1";

    /// Stable Diffusion v2.1, 768px.
    pub const STABLE_DIFFUSION_768_V2_1: &str = "stable-diffusion-768-v2-1";

    /// Stable Inpainting v1.0.
    pub const STABLE_INPAINTING_V1_0: &str = "stable-inpainting-v1-0";

    /// Stable Inpainting v2.0, 512px.
    pub const STABLE_INPAINTING_512_V2_0: &str = "stable-inpainting-512-v2-0";

    /// All of the above.
    pub const ALL: &[&str] = &[
        STABLE_DIFFUSION_V1,
        STABLE_DIFFUSION_V1_5,
        STABLE_DIFFUSION_512_V2_0,
        STABLE_DIFFUSION_768_V2_0,
        STABLE_DIFFUSION_512_V2_1,
        STABLE_DIFFUSION_768_V2_1,
        STABLE_INPAINTING_V1_0,
        STABLE_INPAINTING_512_V2_0,
    ];
}
