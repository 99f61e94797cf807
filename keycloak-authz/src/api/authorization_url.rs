//! Builds the authorization redirect URL the host sends the browser to.

use log::debug;
use serde::{Deserialize, Serialize};

use keycloak_client::{IdentityProvider, KeycloakClient};

use crate::errors::PluginError;
use crate::models::{AuthConfig, PluginResponse};

const OPERATION: &str = "Authorization Server Url";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationServerUrlRequest {
    #[serde(default)]
    pub auth_configs: Vec<AuthConfig>,
    pub authorization_server_callback_url: String,
}

impl AuthorizationServerUrlRequest {
    pub fn from_json(body: &str) -> Result<AuthorizationServerUrlRequest, PluginError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationServerUrlResponse {
    pub authorization_server_url: String,
}

pub struct AuthorizationServerUrlExecutor {
    request: AuthorizationServerUrlRequest,
}

impl AuthorizationServerUrlExecutor {
    pub fn new(request: AuthorizationServerUrlRequest) -> AuthorizationServerUrlExecutor {
        AuthorizationServerUrlExecutor { request }
    }

    pub async fn execute(&self) -> Result<PluginResponse, PluginError> {
        let auth_config = self
            .request
            .auth_configs
            .first()
            .ok_or_else(|| PluginError::no_configuration(OPERATION))?;

        let client = KeycloakClient::new(auth_config.configuration.clone())?;
        let url = client.authorization_url(&self.request.authorization_server_callback_url)?;
        debug!(
            "authorization redirect prepared for auth config `{}`",
            auth_config.id
        );

        let response = AuthorizationServerUrlResponse {
            authorization_server_url: url.into(),
        };
        Ok(PluginResponse::success(serde_json::to_string(&response)?))
    }
}
