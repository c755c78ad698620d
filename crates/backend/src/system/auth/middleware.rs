use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use contracts::system::access::{AccessDecision, DenyReason};

use super::session_service;
use crate::system::app_state::AppState;

/// Request filter in front of every route.
///
/// The session is resolved and evaluated once here. An allowed request
/// carries its `Session` to handlers through request extensions.
pub async fn access_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    if state.resolver.is_public(&path) {
        return next.run(req).await;
    }

    let token = bearer_token(req.headers(), &state.auth.cookie_name);
    let session = session_service::resolve(
        &state.resolver,
        state.sessions.as_ref(),
        token.as_deref(),
    )
    .await;

    match state.resolver.evaluate(&session, &path) {
        AccessDecision::Allowed => {
            if let Ok(session) = session {
                req.extensions_mut().insert(session);
            }
            next.run(req).await
        }
        AccessDecision::Denied {
            redirect_to,
            reason,
        } => {
            tracing::debug!("Denied {} ({}), redirect to {}", path, reason, redirect_to);
            deny_response(&state, &path, &redirect_to, reason)
        }
    }
}

/// Bearer token from the `Authorization` header, falling back to the cookie
pub fn bearer_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// API callers get a status code and JSON, page requests a redirect.
/// A stale or broken token cookie is cleared in both cases.
fn deny_response(state: &AppState, path: &str, redirect_to: &str, reason: DenyReason) -> Response {
    let mut response = if path.starts_with("/api/") {
        let status = if reason.is_unauthenticated() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::FORBIDDEN
        };
        let body = serde_json::json!({
            "error": reason.as_str(),
            "redirect_to": redirect_to,
        });
        (status, Json(body)).into_response()
    } else {
        Redirect::to(redirect_to).into_response()
    };

    if matches!(reason, DenyReason::Expired | DenyReason::Malformed) {
        let cookie = format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
            state.auth.cookie_name
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Cannot build clearing cookie: {}", e),
        }
    }

    response
}
