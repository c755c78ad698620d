use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_at: i64,
}

/// Claims embedded in a bearer token.
///
/// Roles stay as raw strings here: the token is untrusted input and
/// unknown roles are dropped only when a `Session` is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    pub exp: i64, // expiration timestamp, seconds
    #[serde(default)]
    pub iat: i64, // issued at
}

/// Current session as returned by `GET /api/session/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user_id: String,
    pub username: String,
    pub roles: Vec<String>,
    pub departments: Vec<String>,
    pub permissions: Vec<String>,
    pub brands: Vec<String>,
    pub expires_at: i64,
    pub landing_path: String,
}

/// Answer of `GET /api/navigation/check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCheckResponse {
    pub path: String,
    pub allowed: bool,
    pub redirect_to: Option<String>,
    pub reason: Option<String>,
}
