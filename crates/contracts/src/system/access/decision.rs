use serde::{Deserialize, Serialize};
use std::fmt;

use super::session::SessionInvalid;

/// Why a path was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NoToken,
    Expired,
    Malformed,
    RoleDenied,
    DepartmentDenied,
    PermissionDenied,
    /// The path has dot segments or does not decode.
    InvalidPath,
}

impl DenyReason {
    /// Unauthenticated denials lead to the login page, the rest to the
    /// session's landing path.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, DenyReason::NoToken | DenyReason::Expired | DenyReason::Malformed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NoToken => "no_token",
            DenyReason::Expired => "expired",
            DenyReason::Malformed => "malformed",
            DenyReason::RoleDenied => "role_denied",
            DenyReason::DepartmentDenied => "department_denied",
            DenyReason::PermissionDenied => "permission_denied",
            DenyReason::InvalidPath => "invalid_path",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SessionInvalid> for DenyReason {
    fn from(value: SessionInvalid) -> Self {
        match value {
            SessionInvalid::NoToken => DenyReason::NoToken,
            SessionInvalid::Expired => DenyReason::Expired,
            SessionInvalid::Malformed => DenyReason::Malformed,
        }
    }
}

/// Result of evaluating a session against a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allowed,
    Denied {
        redirect_to: String,
        reason: DenyReason,
    },
}

impl AccessDecision {
    pub fn denied(redirect_to: impl Into<String>, reason: DenyReason) -> Self {
        AccessDecision::Denied {
            redirect_to: redirect_to.into(),
            reason,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            AccessDecision::Allowed => None,
            AccessDecision::Denied { redirect_to, .. } => Some(redirect_to),
        }
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            AccessDecision::Allowed => None,
            AccessDecision::Denied { reason, .. } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_failures_map_to_unauthenticated_reasons() {
        for invalid in [SessionInvalid::NoToken, SessionInvalid::Expired, SessionInvalid::Malformed] {
            assert!(DenyReason::from(invalid).is_unauthenticated());
        }
        assert!(!DenyReason::RoleDenied.is_unauthenticated());
        assert!(!DenyReason::DepartmentDenied.is_unauthenticated());
        assert!(!DenyReason::PermissionDenied.is_unauthenticated());
        assert!(!DenyReason::InvalidPath.is_unauthenticated());
    }

    #[test]
    fn test_denied_serializes_with_tag() {
        let decision = AccessDecision::denied("/company", DenyReason::RoleDenied);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"decision": "denied", "redirect_to": "/company", "reason": "role_denied"})
        );
        assert_eq!(decision.redirect_target(), Some("/company"));
        assert!(AccessDecision::Allowed.redirect_target().is_none());
    }
}
