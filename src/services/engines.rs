//! Engines service.

use tracing::instrument;

use super::ServiceContext;
use crate::errors::StabilityResult;
use crate::transport::{HttpRequest, ResponseParser};
use crate::types::engines::Engine;

const LIST_PATH: &str = "engines/list";

/// Engines service for listing the available models.
pub struct EnginesService {
    context: ServiceContext,
}

impl EnginesService {
    /// Creates a new engines service.
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Lists all engines available to the account.
    ///
    /// Every call hits the network; nothing is cached.
    #[instrument(skip(self))]
    pub async fn list(&self) -> StabilityResult<Vec<Engine>> {
        let mut request = HttpRequest::get(LIST_PATH);
        request.headers = self.context.headers(&mime::APPLICATION_JSON);

        let response = self.context.send(request).await?;
        ResponseParser::parse_json(response)
    }
}

impl std::fmt::Debug for EnginesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnginesService").finish()
    }
}
