//! Route definitions for the API.

use axum::{middleware, routing::get, Json, Router};
use std::sync::Arc;

use super::handlers;
use super::middleware::session::session_auth_middleware;
use super::SharedState;
use crate::services::session_service::SessionService;

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    // Build OpenAPI spec once at startup
    let openapi = super::openapi::build_openapi();

    Router::new()
        // Health endpoints (no auth required)
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // OpenAPI spec
        .route(
            "/api/v1/openapi.json",
            get(move || async move { Json(openapi) }),
        )
        // API v1 routes
        .nest("/api/v1", api_v1_routes(state.clone()))
        .with_state(state)
}

/// API v1 routes
fn api_v1_routes(state: SharedState) -> Router<SharedState> {
    // Session service backing the auth middleware
    let sessions = Arc::new(SessionService::new(state.db.clone(), state.config.clone()));

    // Everything except login/logout sits behind the session check
    let protected = Router::new()
        .nest("/auth", handlers::auth::protected_router())
        .nest("/workstations", handlers::workstations::router())
        .nest("/components", handlers::components::router())
        .nest("/printers", handlers::printers::router())
        .nest("/cameras", handlers::cameras::router())
        .nest("/misc", handlers::misc_assets::router())
        .nest("/network", handlers::network::router())
        .nest("/reports", handlers::reports::router())
        .layer(middleware::from_fn_with_state(
            sessions,
            session_auth_middleware,
        ));

    Router::new()
        .nest("/auth", handlers::auth::public_router())
        .merge(protected)
}
