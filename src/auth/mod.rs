//! Credentials for the Stability API.
//!
//! Every call carries the API key as a bearer token. [`AuthProvider`] only
//! produces the `Authorization` value; [`ServiceContext`](crate::services::ServiceContext)
//! decides where it goes, so a provider cannot touch any other header.

use secrecy::{ExposeSecret, SecretString};

use crate::config::StabilityConfig;
use crate::errors::{StabilityError, StabilityResult};

/// Header carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Prefix of keys issued by the Stability dashboard.
pub const KEY_PREFIX: &str = "sk-";

/// Source of the `Authorization` header value.
pub trait AuthProvider: Send + Sync {
    /// Value sent in the `Authorization` header.
    fn authorization(&self) -> String;

    /// Checks the credential once, when the client is built.
    fn validate(&self) -> StabilityResult<()> {
        Ok(())
    }
}

/// Bearer authentication with a Stability API key.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Wraps an API key.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Uses the key held by a client configuration.
    pub fn from_config(config: &StabilityConfig) -> Self {
        Self::new(config.api_key.clone())
    }
}

impl AuthProvider for ApiKeyAuth {
    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Rejects keys that cannot be sent as a header value.
    ///
    /// Keys without the `sk-` prefix are accepted with a warning, since older
    /// keys and proxies use other formats.
    fn validate(&self) -> StabilityResult<()> {
        let key = self.api_key.expose_secret();

        if key.is_empty() {
            return Err(StabilityError::configuration("API key cannot be empty"));
        }
        if !key.chars().all(|c| c.is_ascii_graphic()) {
            return Err(StabilityError::configuration(
                "API key may only contain visible ASCII characters",
            ));
        }
        if !key.starts_with(KEY_PREFIX) {
            tracing::warn!(key_hint = %key_hint(key), "API key does not start with sk-");
        }

        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKeyAuth")
            .field(&key_hint(self.api_key.expose_secret()))
            .finish()
    }
}

/// Redacted form of a key for logs: its last four characters.
///
/// Keys of four characters or fewer are fully masked.
pub fn key_hint(key: &str) -> String {
    let len = key.chars().count();
    if len <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(len - 4).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn auth(key: &str) -> ApiKeyAuth {
        ApiKeyAuth::new(SecretString::new(key.to_string()))
    }

    #[test]
    fn test_authorization_is_bearer_key() {
        assert_eq!(auth("sk-abc123").authorization(), "Bearer sk-abc123");
    }

    #[test]
    fn test_from_config_uses_configured_key() {
        let config = StabilityConfig::builder()
            .api_key("sk-from_config")
            .build()
            .unwrap();

        assert_eq!(
            ApiKeyAuth::from_config(&config).authorization(),
            "Bearer sk-from_config"
        );
    }

    #[test_case("sk-abc123" ; "issued key")]
    #[test_case("legacy-0f9e" ; "key without prefix")]
    fn test_validate_accepts(key: &str) {
        assert!(auth(key).validate().is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("sk-ab cd" ; "inner space")]
    #[test_case("sk-abc\n" ; "trailing newline")]
    #[test_case("€€" ; "multibyte")]
    fn test_validate_rejects(key: &str) {
        assert!(matches!(
            auth(key).validate(),
            Err(StabilityError::Configuration { .. })
        ));
    }

    #[test_case("sk-secret_1234", "...1234" ; "ascii")]
    #[test_case("abcd", "****" ; "four characters")]
    #[test_case("", "****" ; "empty")]
    #[test_case("€€", "****" ; "short multibyte")]
    #[test_case("sk-ключ€€€€", "...€€€€" ; "multibyte tail")]
    fn test_key_hint(key: &str, expected: &str) {
        assert_eq!(key_hint(key), expected);
    }

    #[test]
    fn test_debug_shows_only_hint() {
        let debug = format!("{:?}", auth("sk-secret_key_9876"));
        assert_eq!(debug, "ApiKeyAuth(\"...9876\")");
    }
}
