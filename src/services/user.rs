//! User service: account identity and credit balance.

use tracing::instrument;

use super::ServiceContext;
use crate::errors::StabilityResult;
use crate::transport::{HttpRequest, ResponseParser};
use crate::types::user::{Account, Balance};

const ACCOUNT_PATH: &str = "user/account";
const BALANCE_PATH: &str = "user/balance";

/// Header scoping a balance lookup to an organization.
pub const ORGANIZATION_HEADER: &str = "Organization";

/// User service for account and balance lookups.
pub struct UserService {
    context: ServiceContext,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Gets the account associated with the API key.
    #[instrument(skip(self))]
    pub async fn account(&self) -> StabilityResult<Account> {
        let mut request = HttpRequest::get(ACCOUNT_PATH);
        request.headers = self.context.headers(&mime::APPLICATION_JSON);

        let response = self.context.send(request).await?;
        ResponseParser::parse_json(response)
    }

    /// Gets the remaining credits.
    ///
    /// With an organization id the balance of that organization is returned
    /// instead of the account default.
    #[instrument(skip(self))]
    pub async fn balance(&self, organization_id: Option<&str>) -> StabilityResult<Balance> {
        let mut request = HttpRequest::get(BALANCE_PATH);
        request.headers = self.context.headers(&mime::APPLICATION_JSON);

        if let Some(org) = organization_id {
            request = request.with_header(ORGANIZATION_HEADER, org);
        }

        let response = self.context.send(request).await?;
        ResponseParser::parse_json(response)
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}
