//! Service implementations for the Stability API.
//!
//! Each service holds a [`ServiceContext`] sharing the transport, auth
//! provider and logger built by the client.

mod engines;
mod generation;
mod user;

pub use engines::EnginesService;
pub use generation::GenerationService;
pub use user::UserService;

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{AuthProvider, AUTHORIZATION_HEADER};
use crate::config::DEFAULT_USER_AGENT;
use crate::errors::StabilityResult;
use crate::observability::{Logger, NoopLogger};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, MultipartRequest};

pub use user::ORGANIZATION_HEADER;

/// Headers the client sets itself; custom headers with these names are dropped.
pub const RESERVED_HEADERS: &[&str] = &[
    "Accept",
    AUTHORIZATION_HEADER,
    "Content-Type",
    ORGANIZATION_HEADER,
    "User-Agent",
];

fn is_reserved(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Dependencies shared by every service.
///
/// Also usable directly for routes the services do not wrap: build the
/// request with [`headers`](Self::headers) and pass it to [`send`](Self::send).
#[derive(Clone)]
pub struct ServiceContext {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    logger: Arc<dyn Logger>,
    user_agent: String,
    custom_headers: Vec<(String, String)>,
}

impl ServiceContext {
    /// Creates a context with the default user agent and no logger.
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            transport,
            auth,
            logger: Arc::new(NoopLogger),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            custom_headers: Vec::new(),
        }
    }

    /// Sets the logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Sets the `User-Agent` value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets headers added to every request.
    ///
    /// Names in [`RESERVED_HEADERS`] are compared without case and dropped
    /// with a warning.
    pub fn with_custom_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.custom_headers = headers
            .into_iter()
            .filter(|(name, _)| {
                let reserved = is_reserved(name);
                if reserved {
                    tracing::warn!(header = %name, "Ignoring custom header set by the client");
                }
                !reserved
            })
            .collect();
        self
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Builds the headers common to every request: custom headers, `Accept`,
    /// `User-Agent` and `Authorization`.
    pub fn headers(&self, accept: &mime::Mime) -> HashMap<String, String> {
        let mut headers: HashMap<String, String> = self.custom_headers.iter().cloned().collect();
        headers.insert("Accept".to_string(), accept.to_string());
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert(AUTHORIZATION_HEADER.to_string(), self.auth.authorization());
        headers
    }

    /// Sends a plain request.
    pub async fn send(&self, request: HttpRequest) -> StabilityResult<HttpResponse> {
        self.log_request(request.method.as_str(), &request.path, &request.headers);
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "Response received");
        Ok(response)
    }

    /// Sends a multipart request.
    pub async fn send_multipart(
        &self,
        request: MultipartRequest,
    ) -> StabilityResult<HttpResponse> {
        self.log_request("POST", &request.path, &request.headers);
        let response = self.transport.send_multipart(request).await?;
        tracing::debug!(status = response.status, "Response received");
        Ok(response)
    }

    fn log_request(&self, method: &str, path: &str, headers: &HashMap<String, String>) {
        let mut context = HashMap::new();
        context.insert("path".to_string(), path.to_string());
        if let Some(accept) = headers.get("Accept") {
            context.insert("accept".to_string(), accept.clone());
        }
        self.logger.log(
            crate::observability::LogLevel::Debug,
            &format!("{} {}", method, path),
            Some(&context),
        );
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("custom_headers", &self.custom_headers.len())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
