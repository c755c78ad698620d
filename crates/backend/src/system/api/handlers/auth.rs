use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use contracts::system::auth::{SessionInfo, TokenRequest, TokenResponse};

use crate::system::app_state::AppState;
use crate::system::auth::extractor::CurrentSession;
use crate::system::auth::password::verify_password;

/// Issue a token for a configured principal.
/// Answers 404 unless `auth.dev_login` is enabled.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, StatusCode> {
    if !state.auth.dev_login {
        tracing::warn!("Token request for {} while dev login is disabled", request.username);
        return Err(StatusCode::NOT_FOUND);
    }

    let user = state
        .auth
        .find_dev_user(&request.username)
        .filter(|user| verify_password(&request.password, &user.password_hash))
        .ok_or_else(|| {
            tracing::warn!("Rejected token request for {}", request.username);
            StatusCode::UNAUTHORIZED
        })?;

    let response = state.codec.issue(user).map_err(|e| {
        tracing::error!("Failed to issue token for {}: {:#}", user.username, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("Issued access token for {}", user.username);
    Ok(Json(response))
}

/// Get current session
pub async fn current_session(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<SessionInfo> {
    let landing_path = state.resolver.default_path_for_session(&session).to_string();

    Json(SessionInfo {
        roles: session.roles.iter().map(|r| r.to_string()).collect(),
        departments: session.departments.into_iter().collect(),
        permissions: session.permissions.into_iter().collect(),
        brands: session.brands.into_iter().collect(),
        expires_at: session.expires_at.timestamp(),
        user_id: session.user_id,
        username: session.username,
        landing_path,
    })
}
