//! Configuration module for the Stability client.
//!
//! Holds the API key, base URL, user agent and any extra headers sent with
//! every request. Calls are single request/response exchanges, so there is
//! no timeout or retry setting.

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{StabilityError, StabilityResult};

/// Default base URL for the Stability API.
pub const DEFAULT_BASE_URL: &str = "https://api.stability.ai/v1beta";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("stability-client-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "STABILITY_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "STABILITY_BASE_URL";

/// Configuration for the Stability client.
#[derive(Clone)]
pub struct StabilityConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests.
    pub base_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl StabilityConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> StabilityConfigBuilder {
        StabilityConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STABILITY_API_KEY` (required): API key for authentication
    /// - `STABILITY_BASE_URL` (optional): Custom base URL
    pub fn from_env() -> StabilityResult<Self> {
        let mut builder = StabilityConfigBuilder::new().api_key_from_env(API_KEY_ENV)?;

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        crate::auth::key_hint(self.api_key())
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for StabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilityConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("custom_headers", &self.custom_headers.len())
            .finish()
    }
}

/// Builder for `StabilityConfig`.
#[derive(Default)]
pub struct StabilityConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    user_agent: Option<String>,
    custom_headers: Vec<(String, String)>,
}

impl StabilityConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> StabilityResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| {
            StabilityError::configuration(format!("Environment variable {} not set", var_name))
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> StabilityResult<StabilityConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| StabilityError::configuration("API key is required"))?;

        if api_key.is_empty() {
            return Err(StabilityError::configuration("API key cannot be empty"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = url::Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "https" | "http") {
            return Err(StabilityError::configuration(format!(
                "Unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }
        if parsed.scheme() == "http" {
            tracing::warn!(base_url = %base_url, "Base URL does not use HTTPS");
        }

        Ok(StabilityConfig {
            api_key: SecretString::new(api_key),
            base_url,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            custom_headers: self.custom_headers,
        })
    }
}
