//! Response handling.
//!
//! Artifact and resource calls decode JSON, binary calls keep the body as
//! received. Any non-2xx status becomes [`StabilityError::Api`].

use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::HttpResponse;
use crate::errors::{StabilityError, StabilityResult};

/// Turns transport responses into typed results.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a successful response body as JSON; non-2xx becomes an API error.
    pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> StabilityResult<T> {
        if !response.is_success() {
            return Err(StabilityError::from_response(response.status, &response.body));
        }

        serde_json::from_slice(&response.body).map_err(|e| StabilityError::Serialization {
            message: format!(
                "Failed to deserialize response: {}. Body: {}",
                e,
                String::from_utf8_lossy(&response.body)
            ),
        })
    }

    /// Returns a successful response body as-is; non-2xx becomes an API error.
    pub fn parse_bytes(response: HttpResponse) -> StabilityResult<Bytes> {
        if !response.is_success() {
            return Err(StabilityError::from_response(response.status, &response.body));
        }

        Ok(response.body)
    }
}
