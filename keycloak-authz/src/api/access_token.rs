//! Exchanges the authorization code from the callback for a token pair.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use keycloak_client::{IdentityProvider, KeycloakClient};

use crate::errors::PluginError;
use crate::models::{AuthConfig, PluginResponse};

const OPERATION: &str = "Get Access Token";

#[derive(Debug, Clone, Deserialize)]
pub struct FetchAccessTokenRequest {
    #[serde(default)]
    pub auth_configs: Vec<AuthConfig>,
    pub authorization_server_callback_url: String,
    #[serde(default)]
    pub request_parameters: HashMap<String, String>,
}

impl FetchAccessTokenRequest {
    pub fn from_json(body: &str) -> Result<FetchAccessTokenRequest, PluginError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Authorization code received on the callback, empty when absent.
    pub fn authorization_code(&self) -> &str {
        self.request_parameters
            .get("code")
            .map(String::as_str)
            .unwrap_or_default()
    }
}

pub struct FetchAccessTokenExecutor {
    request: FetchAccessTokenRequest,
}

impl FetchAccessTokenExecutor {
    pub fn new(request: FetchAccessTokenRequest) -> FetchAccessTokenExecutor {
        FetchAccessTokenExecutor { request }
    }

    pub async fn execute(&self) -> Result<PluginResponse, PluginError> {
        let auth_config = self
            .request
            .auth_configs
            .first()
            .ok_or_else(|| PluginError::no_configuration(OPERATION))?;

        let client = KeycloakClient::new(auth_config.configuration.clone())?;
        let token = client
            .exchange_code(
                self.request.authorization_code(),
                &self.request.authorization_server_callback_url,
            )
            .await?;
        debug!("access token fetched for auth config `{}`", auth_config.id);

        Ok(PluginResponse::success(serde_json::to_string(&token)?))
    }
}
