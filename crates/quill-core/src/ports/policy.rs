//! Authorization policy port.

use crate::domain::Identity;

/// Decides what an identity may do.
pub trait AuthorizationPolicy: Send + Sync {
    /// May create, edit, and delete posts.
    fn is_admin(&self, identity: &Identity) -> bool;

    /// May leave comments.
    fn can_comment(&self, identity: &Identity) -> bool;
}

/// Policy backed by the role stored on each user.
#[derive(Debug, Default, Clone, Copy)]
pub struct RolePolicy;

impl AuthorizationPolicy for RolePolicy {
    fn is_admin(&self, identity: &Identity) -> bool {
        identity.user().is_some_and(|u| u.is_admin())
    }

    fn can_comment(&self, identity: &Identity) -> bool {
        !identity.is_anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User};

    fn user(id: i32, role: Role) -> Identity {
        Identity::User(User {
            id,
            email: format!("u{id}@example.com"),
            username: format!("u{id}"),
            password_hash: String::new(),
            role,
        })
    }

    #[test]
    fn test_only_admin_role_passes() {
        let policy = RolePolicy;
        assert!(policy.is_admin(&user(1, Role::Admin)));
        assert!(!policy.is_admin(&user(2, Role::Author)));
        assert!(!policy.is_admin(&Identity::Anonymous));
    }

    #[test]
    fn test_admin_survives_profile_changes() {
        let policy = RolePolicy;
        let mut admin = user(1, Role::Admin);
        if let Identity::User(u) = &mut admin {
            u.email = "renamed@example.com".to_string();
            u.username = "someone-else".to_string();
        }
        assert!(policy.is_admin(&admin));
    }

    #[test]
    fn test_anonymous_cannot_comment() {
        let policy = RolePolicy;
        assert!(!policy.can_comment(&Identity::Anonymous));
        assert!(policy.can_comment(&user(2, Role::Author)));
    }
}
