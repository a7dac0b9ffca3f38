//! User and session models.

use serde::Serialize;
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// Session entity; `token` is an opaque UUID handed to the client as a
/// cookie or bearer token. Timestamps are RFC 3339 UTC strings, which
/// compare correctly both in SQL and lexicographically.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}
