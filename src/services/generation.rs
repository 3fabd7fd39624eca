//! Image generation service.
//!
//! Every generation mode has two entry points: the plain one parses the JSON
//! artifact list, the `_png` one sends `Accept: image/png` and hands back the
//! raw body.
//!
//! Text-to-image posts a JSON body. Image-to-image and masking post multipart
//! forms because they carry image bytes; there the prompt travels as
//! `text_prompts[0][text]` and an unset sampler is left out of the form.

use tracing::instrument;

use super::ServiceContext;
use crate::errors::StabilityResult;
use crate::transport::{HttpRequest, MultipartRequest, ResponseParser};
use crate::types::generation::{
    GenerationResponse, ImageToImageMaskingRequest, ImageToImageRequest, PngImage,
    TextToImageRequest, IMAGE_TO_IMAGE_DEFAULT_STEPS,
};

const PROMPT_FIELD: &str = "text_prompts[0][text]";
const INIT_IMAGE_FIELD: &str = "init_image";
const MASK_IMAGE_FIELD: &str = "mask_image";

/// Image generation service.
pub struct GenerationService {
    context: ServiceContext,
}

impl GenerationService {
    /// Creates a new generation service.
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Generates images from a text prompt.
    #[instrument(skip(self, request), fields(engine = %request.engine_id))]
    pub async fn text_to_image(
        &self,
        request: TextToImageRequest,
    ) -> StabilityResult<GenerationResponse> {
        let http_request = self.build_text_to_image_request(&request, &mime::APPLICATION_JSON)?;
        let response = self.context.send(http_request).await?;
        ResponseParser::parse_json(response)
    }

    /// Generates a single PNG from a text prompt.
    #[instrument(skip(self, request), fields(engine = %request.engine_id))]
    pub async fn text_to_image_png(&self, request: TextToImageRequest) -> StabilityResult<PngImage> {
        let http_request = self.build_text_to_image_request(&request, &mime::IMAGE_PNG)?;
        let response = self.context.send(http_request).await?;
        ResponseParser::parse_bytes(response).map(PngImage::from)
    }

    /// Generates images from a prompt and an initial image.
    #[instrument(skip(self, request), fields(engine = %request.engine_id))]
    pub async fn image_to_image(
        &self,
        request: ImageToImageRequest,
    ) -> StabilityResult<GenerationResponse> {
        let multipart = self.build_image_to_image_request(request, &mime::APPLICATION_JSON);
        let response = self.context.send_multipart(multipart).await?;
        ResponseParser::parse_json(response)
    }

    /// Generates a single PNG from a prompt and an initial image.
    #[instrument(skip(self, request), fields(engine = %request.engine_id))]
    pub async fn image_to_image_png(&self, request: ImageToImageRequest) -> StabilityResult<PngImage> {
        let multipart = self.build_image_to_image_request(request, &mime::IMAGE_PNG);
        let response = self.context.send_multipart(multipart).await?;
        ResponseParser::parse_bytes(response).map(PngImage::from)
    }

    /// Regenerates the masked region of an initial image.
    #[instrument(skip(self, request), fields(engine = %request.engine_id, mask_source = request.mask_source.as_str()))]
    pub async fn image_to_image_masking(
        &self,
        request: ImageToImageMaskingRequest,
    ) -> StabilityResult<GenerationResponse> {
        let multipart = self.build_masking_request(request, &mime::APPLICATION_JSON);
        let response = self.context.send_multipart(multipart).await?;
        ResponseParser::parse_json(response)
    }

    /// Regenerates the masked region of an initial image, returning a PNG.
    #[instrument(skip(self, request), fields(engine = %request.engine_id, mask_source = request.mask_source.as_str()))]
    pub async fn image_to_image_masking_png(
        &self,
        request: ImageToImageMaskingRequest,
    ) -> StabilityResult<PngImage> {
        let multipart = self.build_masking_request(request, &mime::IMAGE_PNG);
        let response = self.context.send_multipart(multipart).await?;
        ResponseParser::parse_bytes(response).map(PngImage::from)
    }

    /// Builds the JSON request for text-to-image.
    fn build_text_to_image_request(
        &self,
        request: &TextToImageRequest,
        accept: &mime::Mime,
    ) -> StabilityResult<HttpRequest> {
        let body = serde_json::to_vec(&request.body())?;

        let mut http_request =
            HttpRequest::post(format!("generation/{}/text-to-image", request.engine_id))
                .with_body(body);
        http_request.headers = self.context.headers(accept);

        Ok(http_request.with_header("Content-Type", mime::APPLICATION_JSON.essence_str()))
    }

    /// Builds the multipart request for image-to-image.
    fn build_image_to_image_request(
        &self,
        request: ImageToImageRequest,
        accept: &mime::Mime,
    ) -> MultipartRequest {
        let options = request.options.resolve(IMAGE_TO_IMAGE_DEFAULT_STEPS);

        let mut multipart =
            MultipartRequest::new(format!("generation/{}/image-to-image", request.engine_id))
                .file(
                    INIT_IMAGE_FIELD,
                    "init_image.png",
                    mime::IMAGE_PNG.essence_str(),
                    request.init_image,
                )
                .text(PROMPT_FIELD, request.prompt)
                .text("image_strength", request.image_strength.to_string());

        for (name, value) in options.form_fields() {
            multipart = multipart.text(name, value);
        }

        multipart.headers = self.context.headers(accept);
        multipart
    }

    /// Builds the multipart request for image-to-image with a mask.
    fn build_masking_request(
        &self,
        request: ImageToImageMaskingRequest,
        accept: &mime::Mime,
    ) -> MultipartRequest {
        let options = request.options.resolve(IMAGE_TO_IMAGE_DEFAULT_STEPS);

        let mut multipart = MultipartRequest::new(format!(
            "generation/{}/image-to-image/masking",
            request.engine_id
        ))
        .file(
            INIT_IMAGE_FIELD,
            "init_image.png",
            mime::IMAGE_PNG.essence_str(),
            request.init_image,
        )
        .text(PROMPT_FIELD, request.prompt)
        .file(
            MASK_IMAGE_FIELD,
            "mask_image.png",
            mime::IMAGE_PNG.essence_str(),
            request.mask_image,
        )
        .text("mask_source", request.mask_source.as_str());

        for (name, value) in options.form_fields() {
            multipart = multipart.text(name, value);
        }

        multipart.headers = self.context.headers(accept);
        multipart
    }
}

impl std::fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationService").finish()
    }
}
