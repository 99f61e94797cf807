//! Authenticates a user from stored credentials and assigns host roles.

use log::debug;
use serde::{Deserialize, Serialize};

use keycloak_client::error::ClientError;
use keycloak_client::models::TokenInfo;
use keycloak_client::validator::TokenValidator;
use keycloak_client::{IdentityProvider, KeycloakClient};

use crate::authorizer::RoleAuthorizer;
use crate::errors::PluginError;
use crate::membership::{GroupClaimChecker, MembershipChecker};
use crate::models::{AuthConfig, PluginResponse, Role, User};

const OPERATION: &str = "Authenticate";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateUserRequest {
    #[serde(default)]
    pub credentials: Option<TokenInfo>,
    #[serde(default)]
    pub auth_configs: Vec<AuthConfig>,
    #[serde(default)]
    pub role_configs: Vec<Role>,
}

impl AuthenticateUserRequest {
    pub fn from_json(body: &str) -> Result<AuthenticateUserRequest, PluginError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Authenticated user plus the role names granted to them.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationResponse {
    pub user: User,
    pub roles: Vec<String>,
}

pub struct AuthenticateUserExecutor<C = GroupClaimChecker> {
    request: AuthenticateUserRequest,
    authorizer: RoleAuthorizer<C>,
}

impl AuthenticateUserExecutor {
    pub fn new(request: AuthenticateUserRequest) -> AuthenticateUserExecutor {
        AuthenticateUserExecutor {
            request,
            authorizer: RoleAuthorizer::new(),
        }
    }
}

impl<C: MembershipChecker> AuthenticateUserExecutor<C> {
    /// Uses a caller-supplied authorizer, substituting the membership
    /// backend.
    pub fn with_authorizer(
        request: AuthenticateUserRequest,
        authorizer: RoleAuthorizer<C>,
    ) -> AuthenticateUserExecutor<C> {
        AuthenticateUserExecutor {
            request,
            authorizer,
        }
    }

    /// Validates the stored token (refreshing it when the provider reports
    /// it inactive), fetches the profile with the live token, and evaluates
    /// the configured roles.
    pub async fn execute(&self) -> Result<PluginResponse, PluginError> {
        let auth_config = self
            .request
            .auth_configs
            .first()
            .ok_or_else(|| PluginError::no_configuration(OPERATION))?;
        let credentials = self
            .request
            .credentials
            .as_ref()
            .ok_or(ClientError::MissingToken)?;

        let client = KeycloakClient::new(auth_config.configuration.clone())?;
        let token = TokenValidator::new(&client).ensure_active(credentials).await?;
        let profile = client.user_profile(&token.access_token).await?;

        let user = User::from(&profile);
        let roles = self
            .authorizer
            .authorize(&profile, auth_config, &self.request.role_configs)
            .await?;
        debug!(
            "authenticated `{}` with {} granted roles",
            user.username,
            roles.len()
        );

        let response = AuthenticationResponse { user, roles };
        Ok(PluginResponse::success(serde_json::to_string(&response)?))
    }
}
