//! User identity as surfaced by the external credential store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Stable string form used inside JWT claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse the claim string form back into a role
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity returned by the credential store after a successful
/// email/password check. Immutable from this subsystem's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable user identifier
    pub id: Uuid,

    /// Login email address
    pub email: String,

    /// Roles granted to the user
    pub roles: Vec<Role>,
}

impl UserIdentity {
    /// Creates an identity with the given roles
    pub fn new(id: Uuid, email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id,
            email: email.into(),
            roles,
        }
    }

    /// Whether the identity carries the admin role
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_claim_string() {
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
        assert_eq!(Role::parse(Role::User.as_str()), Some(Role::User));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn admin_detection() {
        let admin = UserIdentity::new(Uuid::new_v4(), "a@x.com", vec![Role::User, Role::Admin]);
        let user = UserIdentity::new(Uuid::new_v4(), "u@x.com", vec![Role::User]);

        assert!(admin.is_admin());
        assert!(!user.is_admin());
    }
}
