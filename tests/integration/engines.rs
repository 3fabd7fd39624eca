//! Integration tests for engine listing

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use stability_client::StabilityError;
use wiremock::matchers::header;

#[tokio::test]
async fn test_list_engines_integration_success() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "engines/list")
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "stable-diffusion-512-v2-1",
                "name": "Stable Diffusion v2.1",
                "description": "Stability-AI Stable Diffusion v2.1",
                "type": "PICTURE"
            },
            {
                "id": "stable-inpainting-512-v2-0",
                "name": "Stable Inpainting v2.0",
                "description": "Stability-AI Stable Inpainting v2.0",
                "type": "PICTURE"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let engines = client.engines().list().await.unwrap();

    let ids: Vec<_> = engines.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["stable-diffusion-512-v2-1", "stable-inpainting-512-v2-0"]
    );
    assert_eq!(engines[0].engine_type, "PICTURE");
}

#[tokio::test]
async fn test_list_engines_integration_unauthorized() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/engines/list"))
        .respond_with(error_response(
            401,
            "unauthorized",
            "missing authorization header",
        ))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let error = client.engines().list().await.unwrap_err();

    match error {
        StabilityError::Api {
            status,
            message,
            error_name,
            ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "missing authorization header");
            assert_eq!(error_name.as_deref(), Some("unauthorized"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_engines_integration_sends_user_agent_and_custom_headers() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "engines/list")
        .and(header("User-Agent", "demo-app/2.0"))
        .and(header("X-Request-Source", "integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StabilityClient::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v1beta", mock_server.uri()))
        .user_agent("demo-app/2.0")
        .header("X-Request-Source", "integration")
        .build()
        .unwrap();

    let engines = client.engines().list().await.unwrap();
    assert!(engines.is_empty());
}
