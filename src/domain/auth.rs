//! Identity of the signed-in dashboard user.

use serde::{Deserialize, Serialize};

/// Claims carried by the session token issued by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_role_matches_exact_names() {
        let user = AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@univ.fr".to_string(),
            name: "Admin".to_string(),
            roles: vec!["planning".to_string()],
            exp: 0,
        };

        assert!(user.has_role("planning"));
        assert!(!user.has_role("planning_admin"));
    }
}
