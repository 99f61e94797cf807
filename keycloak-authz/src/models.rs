//! Host-facing models: auth configs, role definitions, the mapped user and
//! the response envelope handed back to the dispatch layer.

use keycloak_client::config::KeycloakConfig;
use keycloak_client::models::UserProfile;
use serde::{Deserialize, Serialize};

/// One authorization configuration entry supplied by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub id: String,
    pub configuration: KeycloakConfig,
}

/// A host role granted when the user belongs to at least one of its groups.
#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub auth_config_id: Option<String>,
    #[serde(default)]
    pub configuration: RoleConfiguration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleConfiguration {
    #[serde(rename = "Groups", default)]
    pub groups: String,
}

impl Role {
    /// Groups parsed from the comma-separated `Groups` property. Blank
    /// entries are dropped, so `""` yields an empty list.
    pub fn required_groups(&self) -> Vec<String> {
        self.configuration
            .groups
            .split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// User identity handed to the host, derived from provider claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub display_name: String,
    pub email: String,
}

impl From<&UserProfile> for User {
    fn from(profile: &UserProfile) -> Self {
        let email = profile.email.clone().unwrap_or_default();
        User {
            username: email.clone(),
            display_name: profile.name.clone().unwrap_or_default(),
            email,
        }
    }
}

/// Response envelope for the host dispatch layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginResponse {
    pub response_code: u16,
    pub body: String,
}

impl PluginResponse {
    pub fn success(body: String) -> PluginResponse {
        PluginResponse {
            response_code: 200,
            body,
        }
    }
}
