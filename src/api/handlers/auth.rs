//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::api::dto::MessageResponse;
use crate::api::middleware::session::{CurrentUser, SESSION_COOKIE};
use crate::api::SharedState;
use crate::error::Result;
use crate::services::session_service::SessionService;

/// Create public auth routes (no session required)
pub fn public_router() -> Router<SharedState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Create protected auth routes (session required)
pub fn protected_router() -> Router<SharedState> {
    Router::new().route("/me", get(get_current_user))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub is_admin: bool,
    pub expires_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// Login with credentials
///
/// Opens a session and returns the token both in the body and as an
/// HttpOnly cookie.
#[utoipa::path(
    post,
    path = "/login",
    context_path = "/api/v1/auth",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let sessions = SessionService::new(state.db.clone(), state.config.clone());
    let (user, session) = sessions.login(&payload.username, &payload.password).await?;

    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        session.token,
        state.config.session_ttl_hours * 3600,
    );

    let body = LoginResponse {
        token: session.token,
        username: user.username,
        is_admin: user.is_admin,
        expires_at: session.expires_at,
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

/// Logout current session
///
/// Public on purpose: an expired token must still be able to clear its
/// cookie. Unknown tokens are ignored.
#[utoipa::path(
    post,
    path = "/logout",
    context_path = "/api/v1/auth",
    tag = "auth",
    responses(
        (status = 200, description = "Session closed", body = MessageResponse),
    )
)]
pub async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    if let Some(token) = crate::api::middleware::session::extract_token(&headers) {
        let sessions = SessionService::new(state.db.clone(), state.config.clone());
        sessions.logout(&token).await?;
    }

    let clear_cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    );

    Ok((
        [(header::SET_COOKIE, clear_cookie)],
        Json(MessageResponse::new("Logged out")),
    ))
}

/// Get current user info
#[utoipa::path(
    get,
    path = "/me",
    context_path = "/api/v1/auth",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "No valid session"),
    )
)]
pub async fn get_current_user(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserResponse>> {
    Ok(Json(UserResponse {
        id: user.user_id,
        username: user.username,
        is_admin: user.is_admin,
    }))
}

#[derive(OpenApi)]
#[openapi(
    paths(login, logout, get_current_user),
    components(schemas(LoginRequest, LoginResponse, UserResponse))
)]
pub struct AuthApiDoc;
