use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use super::role::Role;
use crate::system::auth::TokenClaims;

/// Failure of the token decoding primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("token is not well-formed: {0}")]
    Format(String),

    #[error("token signature is invalid")]
    Signature,

    #[error("token claims are invalid: {0}")]
    Claims(String),
}

/// Turns an opaque bearer string into claims.
///
/// Implementations treat the input as untrusted; any failure is reported
/// through `TokenDecodeError` and surfaces as `SessionInvalid::Malformed`.
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenDecodeError>;
}

/// Why no usable session exists for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionInvalid {
    #[error("no token presented")]
    NoToken,

    #[error("token expired")]
    Expired,

    #[error("token malformed")]
    Malformed,
}

/// Outcome of session resolution. Both arms are ordinary values.
pub type SessionState = Result<Session, SessionInvalid>;

/// Decoded, time-bounded claims of an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub roles: BTreeSet<Role>,
    pub departments: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Session with no roles, departments, permissions or brands.
    pub fn new(user_id: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        let user_id = user_id.into();
        Self {
            username: user_id.clone(),
            user_id,
            roles: BTreeSet::new(),
            departments: BTreeSet::new(),
            permissions: BTreeSet::new(),
            brands: BTreeSet::new(),
            expires_at,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn with_departments<S: Into<String>>(mut self, departments: impl IntoIterator<Item = S>) -> Self {
        self.departments.extend(departments.into_iter().map(Into::into));
        self
    }

    pub fn with_permissions<S: Into<String>>(mut self, permissions: impl IntoIterator<Item = S>) -> Self {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn with_brands<S: Into<String>>(mut self, brands: impl IntoIterator<Item = S>) -> Self {
        self.brands.extend(brands.into_iter().map(Into::into));
        self
    }

    /// Build a session from decoded claims.
    ///
    /// Roles that are not part of `Role` are ignored. Returns `Malformed`
    /// when the subject is blank or the expiry is not a representable instant.
    pub fn from_claims(claims: TokenClaims) -> Result<Self, SessionInvalid> {
        if claims.sub.trim().is_empty() {
            return Err(SessionInvalid::Malformed);
        }
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(SessionInvalid::Malformed)?;

        let roles = claims
            .roles
            .iter()
            .filter_map(|r| r.parse::<Role>().ok())
            .collect();

        let username = if claims.username.is_empty() {
            claims.sub.clone()
        } else {
            claims.username
        };

        Ok(Self {
            user_id: claims.sub,
            username,
            roles,
            departments: claims.departments.into_iter().collect(),
            permissions: claims.permissions.into_iter().collect(),
            brands: claims.brands.into_iter().collect(),
            expires_at,
        })
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn in_department(&self, department: &str) -> bool {
        self.departments.contains(department)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Tenant scoping: whether this principal may act on behalf of `brand`.
    pub fn has_brand(&self, brand: &str) -> bool {
        self.brands.contains(brand)
    }

    /// Expiry is inclusive: a session expiring exactly at `now` is expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Resolve a raw, possibly absent bearer token against the current clock.
pub fn resolve_session(decoder: &dyn TokenDecoder, token: Option<&str>) -> SessionState {
    resolve_session_at(decoder, token, Utc::now())
}

/// Resolve a raw, possibly absent bearer token at instant `now`.
pub fn resolve_session_at(
    decoder: &dyn TokenDecoder,
    token: Option<&str>,
    now: DateTime<Utc>,
) -> SessionState {
    let token = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(SessionInvalid::NoToken),
    };

    let claims = decoder
        .decode(token)
        .map_err(|_| SessionInvalid::Malformed)?;

    let session = Session::from_claims(claims)?;
    if session.is_expired_at(now) {
        return Err(SessionInvalid::Expired);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Decoder that reads claims as plain JSON.
    struct JsonDecoder;

    impl TokenDecoder for JsonDecoder {
        fn decode(&self, token: &str) -> Result<TokenClaims, TokenDecodeError> {
            serde_json::from_str(token).map_err(|e| TokenDecodeError::Format(e.to_string()))
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn token(exp: i64, roles: &[&str]) -> String {
        serde_json::json!({
            "sub": "u-42",
            "username": "dispatcher",
            "roles": roles,
            "departments": ["LOGISTICS"],
            "permissions": ["orders.read"],
            "brands": ["acme"],
            "exp": exp,
        })
        .to_string()
    }

    #[test]
    fn test_absent_and_blank_tokens() {
        assert_eq!(resolve_session_at(&JsonDecoder, None, now()), Err(SessionInvalid::NoToken));
        assert_eq!(resolve_session_at(&JsonDecoder, Some("  "), now()), Err(SessionInvalid::NoToken));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(
            resolve_session_at(&JsonDecoder, Some("not-a-token"), now()),
            Err(SessionInvalid::Malformed)
        );
        let blank_sub = r#"{"sub":" ","exp":1800000000}"#;
        assert_eq!(
            resolve_session_at(&JsonDecoder, Some(blank_sub), now()),
            Err(SessionInvalid::Malformed)
        );
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let t = now().timestamp();
        assert_eq!(
            resolve_session_at(&JsonDecoder, Some(&token(t - 1, &["ADMIN"])), now()),
            Err(SessionInvalid::Expired)
        );
        assert_eq!(
            resolve_session_at(&JsonDecoder, Some(&token(t, &["ADMIN"])), now()),
            Err(SessionInvalid::Expired)
        );
        assert!(resolve_session_at(&JsonDecoder, Some(&token(t + 1, &["ADMIN"])), now()).is_ok());
    }

    #[test]
    fn test_session_populated_from_claims() {
        let exp = (now() + Duration::hours(1)).timestamp();
        let session =
            resolve_session_at(&JsonDecoder, Some(&token(exp, &["company", "GHOST"])), now()).unwrap();

        assert_eq!(session.user_id, "u-42");
        assert_eq!(session.username, "dispatcher");
        assert_eq!(session.roles.len(), 1);
        assert!(session.has_role(Role::Company));
        assert!(session.in_department("LOGISTICS"));
        assert!(session.has_permission("orders.read"));
        assert!(session.has_brand("acme"));
        assert!(!session.has_brand("globex"));
        assert_eq!(session.expires_at.timestamp(), exp);
    }

    #[test]
    fn test_duplicate_claim_values_collapse() {
        let claims = TokenClaims {
            sub: "u-1".into(),
            username: String::new(),
            roles: vec!["ADMIN".into(), "admin".into()],
            departments: vec!["FINANCE".into(), "FINANCE".into()],
            permissions: vec![],
            brands: vec![],
            exp: 1_800_000_000,
            iat: 0,
        };
        let session = Session::from_claims(claims).unwrap();
        assert_eq!(session.username, "u-1");
        assert_eq!(session.roles.len(), 1);
        assert_eq!(session.departments.len(), 1);
    }
}
