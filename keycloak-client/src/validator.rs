//! Introspection-driven token refresh.
//!
//! A held token is in one of two states after introspection: still `Active`,
//! or `Refreshing` because the provider no longer accepts it. The transition
//! is a pure function of the introspection response; [`TokenValidator`] drives
//! the resulting provider calls.

use log::debug;

use crate::error::ClientError;
use crate::models::{IntrospectionResponse, TokenInfo};
use crate::IdentityProvider;

/// State of a held access token after introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// The provider still accepts the token; keep it unchanged.
    Active,
    /// The provider reports the token inactive; exchange the refresh token
    /// for a new grant.
    Refreshing,
}

impl TokenState {
    /// Pure transition from an introspection response.
    pub fn after_introspection(introspection: &IntrospectionResponse) -> TokenState {
        if introspection.active {
            TokenState::Active
        } else {
            TokenState::Refreshing
        }
    }
}

/// Ensures a token is live before it is used, refreshing it when needed.
pub struct TokenValidator<'a, P: IdentityProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: IdentityProvider + ?Sized> TokenValidator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Introspects the token; returns it unchanged while active, otherwise
    /// returns the newly issued token from a refresh grant. A failed refresh
    /// propagates as-is and the caller keeps its stale token.
    pub async fn ensure_active(&self, token: &TokenInfo) -> Result<TokenInfo, ClientError> {
        let introspection = self.provider.introspect(&token.access_token).await?;
        match TokenState::after_introspection(&introspection) {
            TokenState::Active => Ok(token.clone()),
            TokenState::Refreshing => {
                debug!("access token no longer active, requesting refresh grant");
                self.provider.refresh_token(&token.refresh_token).await
            }
        }
    }
}
