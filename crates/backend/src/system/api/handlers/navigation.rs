use axum::extract::{Json, Query, State};
use contracts::system::access::MenuNode;
use contracts::system::auth::PathCheckResponse;
use serde::Deserialize;

use crate::system::app_state::AppState;
use crate::system::auth::extractor::CurrentSession;

/// Sidebar entries visible to the current session
pub async fn menu(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Vec<MenuNode>> {
    Json(state.resolver.visible_menu(&session).to_nodes())
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub path: String,
}

/// Route guard for client-side navigation: same decision the request filter makes
pub async fn check_path(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<CheckQuery>,
) -> Json<PathCheckResponse> {
    let decision = state.resolver.evaluate(&Ok(session), &query.path);

    Json(PathCheckResponse {
        allowed: decision.is_allowed(),
        redirect_to: decision.redirect_target().map(str::to_string),
        reason: decision.reason().map(|r| r.to_string()),
        path: query.path,
    })
}
