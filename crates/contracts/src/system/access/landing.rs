use serde::{Deserialize, Serialize};

use super::role::Role;
use super::session::Session;

/// Default landing areas per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingPaths {
    pub admin: String,
    pub transporter: String,
    pub company: String,
    /// Used when the session holds none of the known roles.
    pub generic: String,
}

impl Default for LandingPaths {
    fn default() -> Self {
        Self {
            admin: "/admin".to_string(),
            transporter: "/transporter".to_string(),
            company: "/company".to_string(),
            generic: "/dashboard".to_string(),
        }
    }
}

/// Role precedence for landing resolution, first match wins.
const LANDING_PRECEDENCE: [Role; 4] = [Role::Admin, Role::User, Role::Transporter, Role::Company];

impl LandingPaths {
    /// Landing area of a single role. ADMIN and USER share the admin area.
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Admin | Role::User => &self.admin,
            Role::Transporter => &self.transporter,
            Role::Company => &self.company,
        }
    }

    pub fn for_session(&self, session: &Session) -> &str {
        LANDING_PRECEDENCE
            .iter()
            .find(|role| session.has_role(**role))
            .map(|role| self.for_role(*role))
            .unwrap_or(self.generic.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(roles: &[Role]) -> Session {
        Session::new("u-1", Utc::now()).with_roles(roles.iter().copied())
    }

    #[test]
    fn test_single_roles() {
        let landing = LandingPaths::default();
        assert_eq!(landing.for_session(&session(&[Role::Admin])), "/admin");
        assert_eq!(landing.for_session(&session(&[Role::User])), "/admin");
        assert_eq!(landing.for_session(&session(&[Role::Transporter])), "/transporter");
        assert_eq!(landing.for_session(&session(&[Role::Company])), "/company");
        assert_eq!(landing.for_session(&session(&[])), "/dashboard");
    }

    #[test]
    fn test_precedence_is_independent_of_insertion_order() {
        let landing = LandingPaths::default();
        assert_eq!(
            landing.for_session(&session(&[Role::Transporter, Role::Admin])),
            "/admin"
        );
        assert_eq!(
            landing.for_session(&session(&[Role::Company, Role::Transporter])),
            "/transporter"
        );
        assert_eq!(landing.for_session(&session(&[Role::Company, Role::User])), "/admin");
    }
}
