//! Role name constants used in JWT claims and the `users` table.

/// Full access, including user management.
pub const ROLE_ADMIN: &str = "admin";

/// Content management access (everything under the back office except
/// user administration).
pub const ROLE_EDITOR: &str = "editor";

/// All roles a user row may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Validate a role name against the known set.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_accepted() {
        assert!(validate_role(ROLE_ADMIN).is_ok());
        assert!(validate_role(ROLE_EDITOR).is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = validate_role("superuser").unwrap_err();
        assert!(err.contains("Invalid role"));
    }
}
