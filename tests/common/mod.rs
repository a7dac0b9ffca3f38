//! Common test utilities for integration and handler tests
//!
//! This module provides shared infrastructure for testing:
//! - Isolated in-memory databases with the full schema applied
//! - Application router construction over test state
//! - User seeding and authentication helpers

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

use asset_registry::api::{routes, AppState};
use asset_registry::config::Config;
use asset_registry::db;
use asset_registry::services::session_service::SessionService;

/// Test context containing shared resources for tests
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    // Held so the upload directory outlives the context.
    upload_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with an isolated in-memory database
    pub async fn new() -> Self {
        // A single connection is required: every fresh connection to
        // `sqlite::memory:` opens its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        db::init_schema(&pool)
            .await
            .expect("Failed to initialize schema");

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = test_config(upload_dir.path().to_string_lossy().into_owned());

        Self {
            pool,
            config,
            upload_dir,
        }
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build the full application router over this context's state
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState::new(self.config.clone(), self.pool.clone()));
        routes::create_router(state)
    }
}

/// Configuration with test-friendly defaults
pub fn test_config(upload_dir: String) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        upload_dir,
        session_ttl_hours: 24,
        admin_username: "admin".to_string(),
        admin_password: None,
        subnet_prefix: "192.168.3".to_string(),
        ip_range_start: 1,
        ip_range_end: 254,
        ip_scan_limit: 1500,
    }
}

/// Insert a user with a hashed password and return its id
pub async fn seed_user(pool: &SqlitePool, username: &str, password: &str, is_admin: bool) -> i64 {
    let hash = SessionService::hash_password(password).expect("Failed to hash password");
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(hash)
    .bind(is_admin as i64)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await
    .expect("Failed to insert user");
    result.last_insert_rowid()
}

/// Helper to create a session cookie header value
pub fn session_cookie(token: &str) -> String {
    format!("session={token}")
}

/// Helper to create a bearer token header value
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
