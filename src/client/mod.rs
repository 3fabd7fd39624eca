//! Stability API client.
//!
//! Provides the main client interface for interacting with the Stability API.

use std::sync::Arc;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{StabilityConfig, StabilityConfigBuilder};
use crate::errors::{StabilityError, StabilityResult};
use crate::observability::{ConsoleLogger, LogConfig, Logger};
use crate::services::{EnginesService, GenerationService, ServiceContext, UserService};
use crate::transport::{HttpTransport, HttpTransportImpl};

/// The main Stability client.
///
/// Provides access to engine listing, account lookups and image generation.
///
/// # Example
///
/// ```rust,no_run
/// use stability_client::{StabilityClient, TextToImageRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = StabilityClient::builder()
///         .api_key("sk-your_api_key")
///         .build()?;
///
///     let request = TextToImageRequest::new("stable-diffusion-512-v2-1", "a red apple");
///     let response = client.generation().text_to_image(request).await?;
///     println!("{} artifacts", response.len());
///     Ok(())
/// }
/// ```
pub struct StabilityClient {
    config: StabilityConfig,
    engines_service: EnginesService,
    user_service: UserService,
    generation_service: GenerationService,
    context: ServiceContext,
    logger: Arc<dyn Logger>,
}

impl StabilityClient {
    /// Creates a new client builder.
    pub fn builder() -> StabilityClientBuilder {
        StabilityClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `STABILITY_API_KEY` and optionally `STABILITY_BASE_URL`.
    pub fn from_env() -> StabilityResult<Self> {
        let config = StabilityConfig::from_env()?;
        StabilityClientBuilder::from_config(config).build()
    }

    /// Creates a client from an API key.
    pub fn from_api_key(api_key: impl Into<String>) -> StabilityResult<Self> {
        StabilityClientBuilder::new().api_key(api_key).build()
    }

    /// Returns the engines service.
    pub fn engines(&self) -> &EnginesService {
        &self.engines_service
    }

    /// Returns the user service.
    pub fn user(&self) -> &UserService {
        &self.user_service
    }

    /// Returns the generation service.
    pub fn generation(&self) -> &GenerationService {
        &self.generation_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StabilityConfig {
        &self.config
    }

    /// Returns the logger shared by the services.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Returns the context the services send through.
    ///
    /// Routes without a dedicated service can be called through it with the
    /// same headers and credentials:
    ///
    /// ```rust,no_run
    /// # async fn run(client: &stability_client::StabilityClient) -> stability_client::StabilityResult<()> {
    /// use stability_client::transport::{HttpRequest, ResponseParser};
    ///
    /// let context = client.context();
    /// let mut request = HttpRequest::get("engines/list");
    /// request.headers = context.headers(&mime::APPLICATION_JSON);
    /// let engines: serde_json::Value = ResponseParser::parse_json(context.send(request).await?)?;
/// println!("{}", engines);
    /// # Ok(())
    /// # }
    /// ```
    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        self.context.transport()
    }
}

impl std::fmt::Debug for StabilityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilityClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Stability client.
pub struct StabilityClientBuilder {
    config_builder: StabilityConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
    logger: Option<Arc<dyn Logger>>,
    log_config: LogConfig,
}

impl StabilityClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: StabilityConfigBuilder::new(),
            transport: None,
            auth: None,
            logger: None,
            log_config: LogConfig::default(),
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: StabilityConfig) -> Self {
        let mut config_builder = StabilityConfigBuilder::new()
            .api_key(config.api_key())
            .base_url(&config.base_url)
            .user_agent(&config.user_agent);
        for (name, value) in &config.custom_headers {
            config_builder = config_builder.header(name, value);
        }

        Self {
            config_builder,
            ..Self::new()
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> StabilityResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(user_agent);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets a custom logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the log configuration used by the default console logger.
    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Builds the client.
    pub fn build(self) -> StabilityResult<StabilityClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::new(&config.base_url).map_err(|e| {
                StabilityError::Configuration {
                    message: e.to_string(),
                }
            })?),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_config(&config)),
        };
        auth.validate()?;

        let logger: Arc<dyn Logger> = self
            .logger
            .unwrap_or_else(|| Arc::new(ConsoleLogger::new(self.log_config)));

        let context = ServiceContext::new(transport, auth)
            .with_logger(Arc::clone(&logger))
            .with_user_agent(config.user_agent.clone())
            .with_custom_headers(config.custom_headers.clone());

        tracing::debug!(
            base_url = %config.base_url,
            api_key = %config.api_key_hint(),
            "Stability client initialized"
        );

        Ok(StabilityClient {
            engines_service: EnginesService::new(context.clone()),
            user_service: UserService::new(context.clone()),
            generation_service: GenerationService::new(context.clone()),
            context,
            config,
            logger,
        })
    }
}

impl Default for StabilityClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
