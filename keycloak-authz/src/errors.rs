use keycloak_client::error::ClientError;
use thiserror::Error;

/// Failures surfaced to the host dispatch layer.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The request carried no auth config for an operation that needs one.
    /// The message is user-facing and labeled with the operation name.
    #[error("[{operation}] No authorization configuration found.")]
    NoAuthorizationConfiguration { operation: &'static str },

    #[error("Invalid request payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl PluginError {
    pub fn no_configuration(operation: &'static str) -> PluginError {
        PluginError::NoAuthorizationConfiguration { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_configuration_message_is_labeled_per_operation() {
        assert_eq!(
            PluginError::no_configuration("Authenticate").to_string(),
            "[Authenticate] No authorization configuration found."
        );
        assert_eq!(
            PluginError::no_configuration("Get Access Token").to_string(),
            "[Get Access Token] No authorization configuration found."
        );
        assert_eq!(
            PluginError::no_configuration("Authorization Server Url").to_string(),
            "[Authorization Server Url] No authorization configuration found."
        );
    }

    #[test]
    fn client_errors_keep_their_message() {
        let error = PluginError::from(ClientError::Provider {
            endpoint: "/auth/realms/master/protocol/openid-connect/token".to_string(),
            message: "server error".to_string(),
        });

        assert_eq!(
            error.to_string(),
            "Api call to `/auth/realms/master/protocol/openid-connect/token` \
             failed with error: `server error`"
        );
    }
}
