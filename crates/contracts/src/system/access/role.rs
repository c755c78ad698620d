use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse-grained principal classification carried in the token claims.
///
/// Declaration order is the landing precedence order: a session holding
/// several roles lands in the area of the first one listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
    Transporter,
    Company,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::User, Role::Transporter, Role::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Transporter => "TRANSPORTER",
            Role::Company => "COMPANY",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Claim values are matched case-insensitively ("admin" == "ADMIN").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            "TRANSPORTER" => Ok(Role::Transporter),
            "COMPANY" => Ok(Role::Company),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Transporter ".parse::<Role>(), Ok(Role::Transporter));
        assert_eq!("COMPANY".parse::<Role>(), Ok(Role::Company));
        assert!("SUPERVISOR".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_claim_spelling() {
        let json = serde_json::to_string(&Role::Transporter).unwrap();
        assert_eq!(json, "\"TRANSPORTER\"");
        let role: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_ordering_matches_precedence() {
        let mut roles = vec![Role::Company, Role::Transporter, Role::Admin, Role::User];
        roles.sort();
        assert_eq!(roles, Role::ALL.to_vec());
    }
}
