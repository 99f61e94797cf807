//! Group-membership capability.

use async_trait::async_trait;
use keycloak_client::models::UserProfile;

use crate::errors::PluginError;
use crate::models::AuthConfig;

/// Answers whether a user belongs to at least one of a set of groups.
///
/// Evaluation order over `groups` is unspecified and must not affect the
/// result; an empty group set is never a match.
#[async_trait]
pub trait MembershipChecker: Send + Sync {
    async fn is_member_of_at_least_one_group(
        &self,
        user: &UserProfile,
        auth_config: &AuthConfig,
        groups: &[String],
    ) -> Result<bool, PluginError>;
}

/// Membership backed by the `groups` claim the provider returns from
/// userinfo. The default scope list requests that claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupClaimChecker;

#[async_trait]
impl MembershipChecker for GroupClaimChecker {
    async fn is_member_of_at_least_one_group(
        &self,
        user: &UserProfile,
        _auth_config: &AuthConfig,
        groups: &[String],
    ) -> Result<bool, PluginError> {
        Ok(groups
            .iter()
            .any(|group| user.groups.iter().any(|claim| claim == group)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn auth_config() -> AuthConfig {
        serde_json::from_value(json!({
            "id": "keycloak",
            "configuration": {
                "KeycloakEndpoint": "https://example.com",
                "ClientId": "client-id",
                "ClientSecret": "client-secret"
            }
        }))
        .expect("auth config should deserialize")
    }

    fn user_in_groups(groups: &[&str]) -> UserProfile {
        UserProfile {
            sub: "1234567890".to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
            ..UserProfile::default()
        }
    }

    #[tokio::test]
    async fn matches_any_required_group() {
        let checker = GroupClaimChecker;
        let user = user_in_groups(&["group-2", "group-3"]);

        let member = checker
            .is_member_of_at_least_one_group(
                &user,
                &auth_config(),
                &["group-1".to_string(), "group-3".to_string()],
            )
            .await
            .expect("check should succeed");

        assert!(member);
    }

    #[tokio::test]
    async fn rejects_user_outside_all_required_groups() {
        let checker = GroupClaimChecker;
        let user = user_in_groups(&["group-9"]);

        let member = checker
            .is_member_of_at_least_one_group(&user, &auth_config(), &["group-1".to_string()])
            .await
            .expect("check should succeed");

        assert!(!member);
    }

    #[tokio::test]
    async fn empty_required_group_set_is_never_a_match() {
        let checker = GroupClaimChecker;
        let user = user_in_groups(&["group-1", "group-2"]);

        let member = checker
            .is_member_of_at_least_one_group(&user, &auth_config(), &[])
            .await
            .expect("check should succeed");

        assert!(!member);
    }
}
