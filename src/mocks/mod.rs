//! Mock implementations for testing.
//!
//! Provides a recording mock transport and auth provider for unit testing
//! without making real API calls.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::AuthProvider;
use crate::services::ServiceContext;
use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartPart, MultipartRequest,
    TransportError,
};

/// Mock HTTP transport for testing.
pub struct MockTransport {
    responses: Mutex<Vec<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path.
    pub path: String,
    /// Request body (plain requests).
    pub body: Option<Vec<u8>>,
    /// Form parts (multipart requests).
    pub parts: Vec<MultipartPart>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parses the body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Returns the value of a multipart text field.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            MultipartPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Returns true if the multipart form has a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name() == name)
    }

    /// Returns the multipart field names in submission order.
    pub fn field_names(&self) -> Vec<&str> {
        self.parts.iter().map(MultipartPart::name).collect()
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body: Bytes::from(body),
        }
    }

    /// Creates a successful PNG response.
    pub fn png(data: &[u8]) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "image/png".to_string());

        Self {
            status: 200,
            headers,
            body: Bytes::copy_from_slice(data),
        }
    }

    /// Creates an error response in the API's error format.
    pub fn error(status: u16, name: &str, message: &str) -> Self {
        let error = serde_json::json!({
            "id": "mock-error-id",
            "name": name,
            "message": message
        });

        Self {
            status,
            ..Self::json(&error)
        }
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.responses).push(response);
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues an error response.
    pub fn queue_error(&self, status: u16, name: &str, message: &str) {
        self.queue(MockResponse::error(status, name, message));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_response(&self) -> HttpResponse {
        let mut responses = lock(&self.responses);
        let response = if responses.is_empty() {
            lock(&self.default_response).clone().unwrap_or_else(|| {
                MockResponse::error(500, "mock_error", "No mock response configured")
            })
        } else {
            responses.remove(0)
        };

        HttpResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            body: request.body,
            parts: Vec::new(),
            headers: request.headers,
        });

        Ok(self.next_response())
    }

    async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: HttpMethod::Post,
            path: request.path,
            body: None,
            parts: request.parts,
            headers: request.headers,
        });

        Ok(self.next_response())
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Mock auth provider for testing.
pub struct MockAuth {
    api_key: String,
}

impl MockAuth {
    /// Creates a new mock auth provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("sk-mock_test_key")
    }
}

impl AuthProvider for MockAuth {
    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl std::fmt::Debug for MockAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuth").finish()
    }
}

/// Builds a service context over a mock transport with [`MockAuth`].
pub fn test_context(transport: Arc<MockTransport>) -> ServiceContext {
    ServiceContext::new(transport, Arc::new(MockAuth::default()))
}

/// Test fixtures for common response types.
pub mod fixtures {
    use crate::types::engines::Engine;
    use crate::types::generation::{FinishReason, GenerationArtifact, GenerationResponse};
    use crate::types::user::{Account, OrganizationMembership, OrganizationRole};

    /// A 1x1 transparent PNG.
    pub const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
        0xf8, 0xcf, 0x50, 0x0f, 0x00, 0x03, 0x86, 0x01, 0x80, 0x5a, 0x34, 0x7d, 0x6b, 0x00, 0x00,
        0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    /// Base64 encoding of [`PNG_BYTES`].
    pub const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    /// Creates a generation response with `samples` successful artifacts.
    pub fn generation_response(samples: u64) -> GenerationResponse {
        GenerationResponse {
            artifacts: (0..samples)
                .map(|i| GenerationArtifact {
                    base64: PNG_BASE64.to_string(),
                    seed: 1_000 + i,
                    finish_reason: FinishReason::Success,
                })
                .collect(),
        }
    }

    /// Creates an engine list.
    pub fn engine_list() -> Vec<Engine> {
        vec![
            Engine {
                id: "stable-diffusion-512-v2-1".to_string(),
                description: "Stability-AI Stable Diffusion v2.1".to_string(),
                name: "Stable Diffusion v2.1".to_string(),
                engine_type: "PICTURE".to_string(),
            },
            Engine {
                id: "stable-inpainting-512-v2-0".to_string(),
                description: "Stability-AI Stable Inpainting v2.0".to_string(),
                name: "Stable Inpainting v2.0".to_string(),
                engine_type: "PICTURE".to_string(),
            },
        ]
    }

    /// Creates an account.
    pub fn account() -> Account {
        Account {
            id: "user-1234".to_string(),
            email: "someone@example.com".to_string(),
            organizations: vec![OrganizationMembership {
                id: "org-1".to_string(),
                name: "Personal".to_string(),
                role: OrganizationRole::Owner,
                is_default: true,
            }],
            profile_picture: None,
        }
    }
}
