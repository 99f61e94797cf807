//! # keycloak-client
//!
//! HTTP client library for a Keycloak OpenID Connect provider.
//!
//! ## Components
//!
//! - **Config:** realm connection settings parsed from host configuration.
//! - **Client:** reqwest-backed implementation of the provider operations
//!   (authorization redirect, code exchange, refresh, introspection,
//!   userinfo).
//! - **Validator:** introspection-driven token refresh state machine.

pub mod config;
pub mod error;
pub mod models;
pub mod realm;
pub mod validator;

use async_trait::async_trait;
use log::{debug, warn};
use rand::Rng;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::KeycloakConfig;
use crate::error::ClientError;
use crate::models::{IntrospectionResponse, TokenInfo, UserProfile};
use crate::realm::{realm_url, RealmEndpoint};

/// Connect timeout for provider calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Overall request timeout, covering write and read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations this library needs from an identity provider. Implemented by
/// [`KeycloakClient`]; hosts substitute their own backend through this trait.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the browser redirect URL that starts the authorization code
    /// flow. `state` and `nonce` are generated fresh per call and are not
    /// persisted; verifying them on callback is the caller's concern.
    fn authorization_url(&self, callback_url: &str) -> Result<Url, ClientError>;

    /// Exchanges an authorization code for a token pair.
    async fn exchange_code(&self, code: &str, redirect_uri: &str)
        -> Result<TokenInfo, ClientError>;

    /// Exchanges a refresh token for a newly issued token pair.
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenInfo, ClientError>;

    /// Asks the provider whether a token is currently active.
    async fn introspect(&self, token: &str) -> Result<IntrospectionResponse, ClientError>;

    /// Fetches the userinfo claims for an access token.
    async fn user_profile(&self, access_token: &str) -> Result<UserProfile, ClientError>;
}

/// reqwest-backed [`IdentityProvider`] bound to one provider configuration.
#[derive(Debug, Clone)]
pub struct KeycloakClient {
    config: KeycloakConfig,
    client: Client,
}

impl KeycloakClient {
    /// Validates the configuration and builds the reusable HTTP client.
    /// Fails before any network call when the configuration is malformed.
    pub fn new(config: KeycloakConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { config, client })
    }

    /// Uses a caller-supplied HTTP client so one connection pool can be
    /// shared across provider clients.
    pub fn with_http_client(config: KeycloakConfig, client: Client) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &KeycloakConfig {
        &self.config
    }

    fn endpoint(&self, endpoint: RealmEndpoint, params: &[(&str, &str)]) -> Result<Url, ClientError> {
        realm_url(&self.config.endpoint, &self.config.realm, endpoint, params)
    }

    /// Sends the request and maps the response: non-2xx becomes a provider
    /// error carrying the response body when there is one, the status reason
    /// phrase otherwise.
    async fn execute<R>(&self, request: RequestBuilder, url: &Url) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let endpoint = url.path().to_string();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(endpoint.clone())
            } else {
                ClientError::Network {
                    endpoint: endpoint.clone(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body
            };
            warn!("provider call to `{endpoint}` failed with status {status}");
            return Err(ClientError::Provider { endpoint, message });
        }

        response
            .json::<R>()
            .await
            .map_err(|source| ClientError::Decode { endpoint, source })
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    fn authorization_url(&self, callback_url: &str) -> Result<Url, ClientError> {
        let state = generate_secure_token();
        let nonce = generate_secure_token();
        let url = self.endpoint(
            RealmEndpoint::Authorize,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", callback_url),
                ("response_type", "code"),
                ("scope", self.config.scopes.as_str()),
                ("state", state.as_str()),
                ("nonce", nonce.as_str()),
            ],
        )?;
        debug!(
            "built authorization redirect for realm `{}`",
            self.config.realm
        );
        Ok(url)
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenInfo, ClientError> {
        if code.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "Authorization code must not be empty.".to_string(),
            ));
        }

        let url = self.endpoint(RealmEndpoint::Token, &[])?;
        debug!("exchanging authorization code at `{}`", url.path());
        let request = self
            .client
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ]);
        self.execute(request, &url).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenInfo, ClientError> {
        let url = self.endpoint(RealmEndpoint::Token, &[])?;
        debug!("requesting refresh grant at `{}`", url.path());
        let request = self
            .client
            .post(url.clone())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ]);
        self.execute(request, &url).await
    }

    async fn introspect(&self, token: &str) -> Result<IntrospectionResponse, ClientError> {
        let url = self.endpoint(RealmEndpoint::Introspect, &[])?;
        debug!("introspecting token at `{}`", url.path());
        let request = self
            .client
            .post(url.clone())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("token", token)]);
        self.execute(request, &url).await
    }

    async fn user_profile(&self, access_token: &str) -> Result<UserProfile, ClientError> {
        if access_token.is_empty() {
            return Err(ClientError::MissingToken);
        }

        let url = self.endpoint(RealmEndpoint::Userinfo, &[])?;
        debug!("fetching userinfo at `{}`", url.path());
        let request = self.client.get(url.clone()).bearer_auth(access_token);
        self.execute(request, &url).await
    }
}

/// 32 random bytes encoded as unpadded base64url: 256 bits of entropy for
/// single-use `state`/`nonce` identifiers.
fn generate_secure_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes[..]);
    base64_url::encode(&bytes)
}

mod base64_url {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    pub fn encode(input: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> KeycloakConfig {
        KeycloakConfig {
            endpoint: "https://example.com".to_string(),
            realm: "master".to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            scopes: config::DEFAULT_SCOPES.to_string(),
        }
    }

    #[test]
    fn authorization_url_has_expected_shape() {
        let client = KeycloakClient::new(test_config()).expect("client should build");

        let url = client
            .authorization_url("callback-url")
            .expect("url should build");

        let expected_prefix = "https://example.com/auth/realms/master/protocol/openid-connect/auth\
             ?client_id=client-id\
             &redirect_uri=callback-url\
             &response_type=code\
             &scope=openid+profile+email+groups+roles\
             &state=";
        assert!(
            url.as_str().starts_with(expected_prefix),
            "unexpected url: {url}"
        );
        assert!(url.as_str().contains("&nonce="));
    }

    #[test]
    fn authorization_url_rotates_state_and_nonce() {
        let client = KeycloakClient::new(test_config()).expect("client should build");

        let first = client
            .authorization_url("callback-url")
            .expect("url should build");
        let second = client
            .authorization_url("callback-url")
            .expect("url should build");

        let params = |url: &Url, name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
                .expect("parameter should be present")
        };

        assert_ne!(params(&first, "state"), params(&second, "state"));
        assert_ne!(params(&first, "nonce"), params(&second, "nonce"));
    }

    #[test]
    fn rejects_malformed_configuration_up_front() {
        let mut config = test_config();
        config.endpoint = "not an url".to_string();

        assert!(matches!(
            KeycloakClient::new(config),
            Err(ClientError::UrlParse(_))
        ));
    }

    #[tokio::test]
    async fn empty_authorization_code_is_rejected_before_any_request() {
        let client = KeycloakClient::new(test_config()).expect("client should build");

        let result = client.exchange_code("  ", "callback-url").await;

        assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    }

    #[test]
    fn secure_tokens_are_long_and_unique() {
        let first = generate_secure_token();
        let second = generate_secure_token();

        // 32 bytes in unpadded base64url
        assert_eq!(first.len(), 43);
        assert_ne!(first, second);
    }
}
