//! Session authentication middleware.
//!
//! Resolves the session token carried by a request to its user and stashes
//! the result as a request extension for downstream handlers.
//!
//! Supported token carriers:
//! - `Cookie: session=<token>` - set by the login handler for browsers
//! - `Authorization: Bearer <token>` - for scripted clients

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::services::session_service::SessionService;

/// Cookie that carries the session token
pub const SESSION_COOKIE: &str = "session";

/// Extension that holds the authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// Pull the session token out of a `Cookie` header value.
fn token_from_cookie_header(value: &str) -> Option<&str> {
    value.split(';').find_map(|pair| {
        let (name, token) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !token.is_empty() {
            Some(token)
        } else {
            None
        }
    })
}

/// Extract the session token from request headers.
/// Checks: Cookie (session=...), Authorization (Bearer ...)
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(COOKIE).and_then(|h| h.to_str().ok()) {
        if let Some(token) = token_from_cookie_header(cookie_header) {
            return Some(token.to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// Session middleware function - requires a valid, unexpired session
pub async fn session_auth_middleware(
    State(sessions): State<Arc<SessionService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        return AppError::Authentication("Authentication required".to_string()).into_response();
    };

    match sessions.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser {
                user_id: user.id,
                username: user.username,
                is_admin: user.is_admin,
            });
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}
