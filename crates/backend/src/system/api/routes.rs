use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use super::handlers;
use crate::system::app_state::AppState;
use crate::system::auth::middleware::access_guard;
use crate::system::middleware::request_logger::request_logger;

/// Конфигурация роутов приложения
///
/// Every route, the static UI fallback included, sits behind `access_guard`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        // ========================================
        // PUBLIC
        // ========================================
        .route("/health", get(|| async { "ok" }))
        .route("/api/auth/token", post(handlers::auth::issue_token))
        // ========================================
        // SESSION & NAVIGATION (any valid session)
        // ========================================
        .route("/api/session/me", get(handlers::auth::current_session))
        .route("/api/navigation/menu", get(handlers::navigation::menu))
        .route("/api/navigation/check", get(handlers::navigation::check_path))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), access_guard))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
