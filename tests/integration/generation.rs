//! Integration tests for image generation

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use stability_client::{
    ClipGuidancePreset, FinishReason, GenerationOptions, ImageToImageMaskingRequest,
    ImageToImageRequest, MaskSource, Sampler, StabilityError, TextToImageRequest,
};
use wiremock::matchers::{body_json, header};

const ENGINE: &str = "stable-diffusion-512-v2-1";

#[tokio::test]
async fn test_text_to_image_integration_default_body() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/text-to-image")
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "text_prompts": [{"text": "a red apple"}],
            "cfg_scale": 7.0,
            "clip_guidance_preset": "FAST_BLUE",
            "height": 512,
            "width": 512,
            "samples": 1,
            "steps": 20,
            "sampler": null
        })))
        .respond_with(artifacts_response(1))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .generation()
        .text_to_image(TextToImageRequest::new(ENGINE, "a red apple"))
        .await
        .unwrap();

    assert_eq!(response.len(), 1);
    assert_eq!(response.artifacts[0].finish_reason, FinishReason::Success);
    assert_eq!(response.artifacts[0].seed, 4_000_000_000);
    assert_eq!(response.artifacts[0].decode().unwrap(), png_bytes());
}

#[tokio::test]
async fn test_text_to_image_integration_custom_options() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/text-to-image")
        .and(body_json(json!({
            "text_prompts": [{"text": "a lighthouse at dusk"}],
            "cfg_scale": 12.5,
            "clip_guidance_preset": "FAST_GREEN",
            "height": 768,
            "width": 1024,
            "samples": 3,
            "steps": 50,
            "sampler": "K_DPMPP_2M"
        })))
        .respond_with(artifacts_response(3))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GenerationOptions::new()
        .cfg_scale(12.5)
        .clip_guidance_preset(ClipGuidancePreset::FastGreen)
        .size(1024, 768)
        .samples(3)
        .steps(50)
        .sampler(Sampler::KDpmpp2M);

    let client = client_for(&mock_server);
    let response = client
        .generation()
        .text_to_image(TextToImageRequest::new(ENGINE, "a lighthouse at dusk").options(options))
        .await
        .unwrap();

    assert_eq!(response.decode_all().unwrap().len(), 3);
}

#[tokio::test]
async fn test_text_to_image_png_integration_returns_raw_body() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/text-to-image")
        .and(header("Accept", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let png = client
        .generation()
        .text_to_image_png(TextToImageRequest::new(ENGINE, "a red apple"))
        .await
        .unwrap();

    assert_eq!(png.as_bytes(), png_bytes().as_slice());
}

#[tokio::test]
async fn test_text_to_image_integration_bad_request() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/text-to-image")
        .respond_with(error_response(
            400,
            "invalid_samples",
            "samples must be between 1 and 10",
        ))
        .mount(&mock_server)
        .await;

    let options = GenerationOptions::new().samples(0);
    let client = client_for(&mock_server);
    let error = client
        .generation()
        .text_to_image(TextToImageRequest::new(ENGINE, "a red apple").options(options))
        .await
        .unwrap_err();

    assert!(error.is_client_error());
    match error {
        StabilityError::Api {
            status,
            message,
            error_id,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "samples must be between 1 and 10");
            assert_eq!(
                error_id.as_deref(),
                Some("9160aa70-222f-4a36-9eb7-475e2668362a")
            );
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_image_to_image_integration_sends_form() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/image-to-image")
        .and(header("Accept", "application/json"))
        .respond_with(artifacts_response(1))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ImageToImageRequest::new(ENGINE, "a castle in winter", png_bytes())
        .image_strength(0.6);

    let client = client_for(&mock_server);
    let response = client.generation().image_to_image(request).await.unwrap();
    assert_eq!(response.len(), 1);

    let requests = mock_server.received_requests().await.unwrap();
    let received = &requests[0];
    let content_type = received
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = &received.body;
    assert_eq!(
        form_field_names(body),
        vec![
            "init_image",
            "text_prompts[0][text]",
            "image_strength",
            "cfg_scale",
            "clip_guidance_preset",
            "height",
            "width",
            "samples",
            "steps",
        ]
    );
    assert_eq!(
        form_field(body, "text_prompts[0][text]").as_deref(),
        Some("a castle in winter")
    );
    assert_eq!(form_field(body, "image_strength").as_deref(), Some("0.6"));
    assert_eq!(form_field(body, "steps").as_deref(), Some("10"));
    assert_eq!(form_field(body, "clip_guidance_preset").as_deref(), Some("FAST_BLUE"));
    assert!(form_field(body, "sampler").is_none());
    assert!(String::from_utf8_lossy(body).contains("filename=\"init_image.png\""));
}

#[tokio::test]
async fn test_image_to_image_integration_sends_sampler_when_set() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/image-to-image")
        .respond_with(artifacts_response(1))
        .mount(&mock_server)
        .await;

    let request = ImageToImageRequest::new(ENGINE, "a castle", png_bytes())
        .options(GenerationOptions::new().sampler(Sampler::KEulerAncestral));

    let client = client_for(&mock_server);
    client.generation().image_to_image(request).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        form_field(&requests[0].body, "sampler").as_deref(),
        Some("K_EULER_ANCESTRAL")
    );
}

#[tokio::test]
async fn test_image_to_image_png_integration() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/image-to-image")
        .and(header("Accept", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ImageToImageRequest::new(ENGINE, "a castle", png_bytes());
    let client = client_for(&mock_server);
    let png = client.generation().image_to_image_png(request).await.unwrap();

    assert_eq!(png.len(), png_bytes().len());
}

#[tokio::test]
async fn test_image_to_image_masking_integration_sends_form() {
    let mock_server = setup_mock_server().await;

    mock_with_auth(
        "POST",
        "generation/stable-inpainting-512-v2-0/image-to-image/masking",
    )
    .respond_with(artifacts_response(2))
    .expect(1)
    .mount(&mock_server)
    .await;

    let request = ImageToImageMaskingRequest::new(
        "stable-inpainting-512-v2-0",
        "a wooden door",
        png_bytes(),
        png_bytes(),
    )
    .mask_source(MaskSource::InitImageAlpha)
    .options(GenerationOptions::new().samples(2));

    let client = client_for(&mock_server);
    let response = client
        .generation()
        .image_to_image_masking(request)
        .await
        .unwrap();
    assert_eq!(response.successful().len(), 2);

    let requests = mock_server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert_eq!(
        form_field_names(body),
        vec![
            "init_image",
            "text_prompts[0][text]",
            "mask_image",
            "mask_source",
            "cfg_scale",
            "clip_guidance_preset",
            "height",
            "width",
            "samples",
            "steps",
        ]
    );
    assert_eq!(
        form_field(body, "mask_source").as_deref(),
        Some("INIT_IMAGE_ALPHA")
    );
    assert_eq!(form_field(body, "samples").as_deref(), Some("2"));
    assert!(String::from_utf8_lossy(body).contains("filename=\"mask_image.png\""));
}

#[tokio::test]
async fn test_image_to_image_masking_png_integration_error() {
    let mock_server = setup_mock_server().await;

    mock_with_auth(
        "POST",
        "generation/stable-inpainting-512-v2-0/image-to-image/masking",
    )
    .and(header("Accept", "image/png"))
    .respond_with(error_response(
        404,
        "not_found",
        "engine not found",
    ))
    .mount(&mock_server)
    .await;

    let request = ImageToImageMaskingRequest::new(
        "stable-inpainting-512-v2-0",
        "a wooden door",
        png_bytes(),
        png_bytes(),
    );

    let client = client_for(&mock_server);
    let error = client
        .generation()
        .image_to_image_masking_png(request)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_text_to_image_png_integration_custom_headers_do_not_duplicate_reserved() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "generation/stable-diffusion-512-v2-1/text-to-image")
        .and(header("Accept", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StabilityClient::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v1beta", mock_server.uri()))
        .header("accept", "application/json")
        .header("authorization", "Bearer other")
        .header("X-Request-Source", "integration")
        .build()
        .unwrap();

    let png = client
        .generation()
        .text_to_image_png(TextToImageRequest::new(ENGINE, "a red apple"))
        .await
        .unwrap();
    assert_eq!(png.as_bytes(), png_bytes().as_slice());

    let requests = mock_server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    let values = |name: &str| -> Vec<String> {
        headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    };
    assert_eq!(values("accept"), vec!["image/png".to_string()]);
    assert_eq!(values("authorization"), vec![format!("Bearer {}", API_KEY)]);
    assert_eq!(values("x-request-source"), vec!["integration".to_string()]);
}
