//! Provider connection settings, parsed from the host's auth-config JSON.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;

/// Realm used when the host configuration leaves `KeycloakRealm` out.
pub const DEFAULT_REALM: &str = "master";
/// Scopes requested when the host configuration leaves `KeycloakScopes` out.
/// `groups` puts the group-membership claim into the userinfo response.
pub const DEFAULT_SCOPES: &str = "openid profile email groups roles";

/// Connection settings for one Keycloak realm.
///
/// Immutable once parsed; cloned freely into the client built for it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeycloakConfig {
    #[serde(rename = "KeycloakEndpoint")]
    pub endpoint: String,

    #[serde(rename = "KeycloakRealm", default = "default_realm")]
    pub realm: String,

    #[serde(rename = "ClientId")]
    pub client_id: String,

    #[serde(rename = "ClientSecret")]
    pub client_secret: String,

    #[serde(rename = "KeycloakScopes", default = "default_scopes")]
    pub scopes: String,
}

fn default_realm() -> String {
    DEFAULT_REALM.to_string()
}

fn default_scopes() -> String {
    DEFAULT_SCOPES.to_string()
}

impl KeycloakConfig {
    /// Checks the invariants a client relies on: an absolute endpoint URL and
    /// non-empty realm and client id. Runs before any network call is made.
    pub fn validate(&self) -> Result<(), ClientError> {
        self.base_url()?;
        if self.realm.trim().is_empty() {
            return Err(ClientError::Configuration(
                "KeycloakRealm must not be blank".to_string(),
            ));
        }
        if self.client_id.trim().is_empty() {
            return Err(ClientError::Configuration(
                "ClientId must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses the configured endpoint as an absolute base URL.
    pub fn base_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(&self.endpoint)?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "KeycloakEndpoint `{}` cannot be used as a base URL",
                self.endpoint
            )));
        }
        Ok(url)
    }
}

impl std::fmt::Debug for KeycloakConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakConfig")
            .field("endpoint", &self.endpoint)
            .field("realm", &self.realm)
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            // Client secret stays out of Debug output
            .finish_non_exhaustive()
    }
}
