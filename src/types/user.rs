//! Account and balance types.

use serde::{Deserialize, Serialize};

/// Account associated with the API key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    /// Account ID.
    pub id: String,

    /// Account email.
    pub email: String,

    /// Organizations the account belongs to.
    #[serde(default)]
    pub organizations: Vec<OrganizationMembership>,

    /// Profile picture URL.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Account {
    /// Returns the organization marked as default, if any.
    pub fn default_organization(&self) -> Option<&OrganizationMembership> {
        self.organizations.iter().find(|o| o.is_default)
    }
}

/// Membership of the account in an organization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrganizationMembership {
    /// Organization ID, usable as the balance scope.
    pub id: String,

    /// Organization name.
    pub name: String,

    /// Role of the account within the organization.
    pub role: OrganizationRole,

    /// Whether this is the account's default organization.
    #[serde(default)]
    pub is_default: bool,
}

/// Role within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationRole {
    /// Regular member.
    Member,
    /// Organization owner.
    Owner,
}

/// Remaining credits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Balance {
    /// Credits left.
    pub credits: f64,
}
