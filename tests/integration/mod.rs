//! Integration tests using WireMock
//!
//! These tests run the real reqwest transport against a mock HTTP server and
//! check what goes over the wire: paths, headers, JSON bodies and multipart
//! forms, plus how responses come back.

pub mod engines;
pub mod generation;
pub mod user;

use base64::Engine as _;
use stability_client::StabilityClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// API key used by every test client.
pub const API_KEY: &str = "sk-integration_test_key";

/// Base64 of a 1x1 transparent PNG.
pub const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Decoded [`PNG_BASE64`].
pub fn png_bytes() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(PNG_BASE64)
        .unwrap()
}

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Builds a client pointed at the mock server under a `/v1beta` prefix.
pub fn client_for(server: &MockServer) -> StabilityClient {
    StabilityClient::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v1beta", server.uri()))
        .build()
        .unwrap()
}

/// A mock matching method, path and the bearer token.
pub fn mock_with_auth(method_matcher: &str, path_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(format!("/v1beta/{}", path_matcher)))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
}

/// An error response in the API's error format.
pub fn error_response(status: u16, name: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "id": "9160aa70-222f-4a36-9eb7-475e2668362a",
        "name": name,
        "message": message
    }))
}

/// A JSON artifact list with `samples` entries.
pub fn artifacts_response(samples: u64) -> ResponseTemplate {
    let artifacts: Vec<_> = (0..samples)
        .map(|i| {
            serde_json::json!({
                "base64": PNG_BASE64,
                "seed": 4_000_000_000_u64 + i,
                "finishReason": "SUCCESS"
            })
        })
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "artifacts": artifacts }))
}

/// Returns the value of a text field in a `multipart/form-data` body.
pub fn form_field(body: &[u8], name: &str) -> Option<String> {
    let body = String::from_utf8_lossy(body);
    let marker = format!("name=\"{}\"", name);
    let start = body.find(&marker)?;
    let rest = &body[start + marker.len()..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let rest = &rest[value_start..];
    let value_end = rest.find("\r\n--")?;
    Some(rest[..value_end].to_string())
}

/// Returns the field names of a `multipart/form-data` body in order.
pub fn form_field_names(body: &[u8]) -> Vec<String> {
    let body = String::from_utf8_lossy(body);
    body.match_indices("Content-Disposition: form-data; name=\"")
        .filter_map(|(index, marker)| {
            let rest = &body[index + marker.len()..];
            rest.find('"').map(|end| rest[..end].to_string())
        })
        .collect()
}
