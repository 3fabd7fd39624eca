//! Error types for the Stability client.
//!
//! Failures are surfaced close to the wire: non-success HTTP statuses come back
//! as [`StabilityError::Api`] carrying the status code and raw body, transport
//! failures as [`StabilityError::Network`]. Nothing is retried.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for Stability operations.
pub type StabilityResult<T> = Result<T, StabilityError>;

/// Error type for Stability client operations.
#[derive(Debug, Error)]
pub enum StabilityError {
    /// Configuration error (missing API key, invalid base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The API answered with a non-success status code.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API, or a generic one.
        message: String,
        /// Error id reported by the API.
        error_id: Option<String>,
        /// Error name reported by the API (e.g. `bad_request`).
        error_name: Option<String>,
        /// Raw response body.
        body: Option<String>,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// An artifact carried invalid base64 data.
    #[error("Decode error: {message}")]
    Decode {
        /// Error message.
        message: String,
    },
}

impl StabilityError {
    /// Returns the HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            StabilityError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for 4xx API errors.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Returns true for 5xx API errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        StabilityError::Configuration {
            message: message.into(),
        }
    }

    /// Builds an API error from a status code and a raw response body.
    ///
    /// The body is parsed as the API error document when possible.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let raw = (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned());

        match serde_json::from_slice::<ApiErrorResponse>(body) {
            Ok(error) => StabilityError::Api {
                status,
                message: error.message,
                error_id: error.id,
                error_name: error.name,
                body: raw,
            },
            Err(_) => StabilityError::Api {
                status,
                message: format!("HTTP error: {}", status),
                error_id: None,
                error_name: None,
                body: raw,
            },
        }
    }
}

/// Error document returned by the Stability API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Unique id of the failed request.
    pub id: Option<String>,
    /// Short error name.
    pub name: Option<String>,
    /// Human readable message.
    pub message: String,
}

impl From<TransportError> for StabilityError {
    fn from(err: TransportError) -> Self {
        StabilityError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StabilityError {
    fn from(err: serde_json::Error) -> Self {
        StabilityError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for StabilityError {
    fn from(err: url::ParseError) -> Self {
        StabilityError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

impl From<base64::DecodeError> for StabilityError {
    fn from(err: base64::DecodeError) -> Self {
        StabilityError::Decode {
            message: err.to_string(),
        }
    }
}
