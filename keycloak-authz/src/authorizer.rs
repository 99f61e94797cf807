//! Role-authorization decision logic.

use keycloak_client::models::UserProfile;
use log::debug;

use crate::errors::PluginError;
use crate::membership::{GroupClaimChecker, MembershipChecker};
use crate::models::{AuthConfig, Role};

/// Maps provider group membership onto configured role names.
pub struct RoleAuthorizer<C = GroupClaimChecker> {
    checker: C,
}

impl RoleAuthorizer {
    pub fn new() -> RoleAuthorizer {
        RoleAuthorizer {
            checker: GroupClaimChecker,
        }
    }
}

impl Default for RoleAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MembershipChecker> RoleAuthorizer<C> {
    /// Uses a caller-supplied membership backend.
    pub fn with_checker(checker: C) -> RoleAuthorizer<C> {
        RoleAuthorizer { checker }
    }

    /// Returns the names of the roles whose required groups the user belongs
    /// to, preserving input order and keeping duplicates independent. An
    /// empty role list returns immediately without consulting the membership
    /// backend.
    pub async fn authorize(
        &self,
        user: &UserProfile,
        auth_config: &AuthConfig,
        roles: &[Role],
    ) -> Result<Vec<String>, PluginError> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let mut granted = Vec::new();
        for role in roles {
            let required = role.required_groups();
            if self
                .checker
                .is_member_of_at_least_one_group(user, auth_config, &required)
                .await?
            {
                granted.push(role.name.clone());
            }
        }
        debug!(
            "granted {} of {} configured roles",
            granted.len(),
            roles.len()
        );
        Ok(granted)
    }
}
