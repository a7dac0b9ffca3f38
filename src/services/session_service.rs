//! Session service.
//!
//! Credential verification and opaque session tokens backed by the
//! `sessions` table. Tokens reach the client as an HttpOnly cookie (set by
//! the auth handlers) or may be replayed as a bearer header.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::user::{Session, User};

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, created_at";

/// Session service
pub struct SessionService {
    db: SqlitePool,
    config: Config,
}

impl SessionService {
    /// Create a new session service
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self { db, config }
    }

    /// Hash a password with bcrypt
    pub fn hash_password(password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a bcrypt hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }

    /// Verify credentials and open a new session.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not reveal which part failed.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, Session)> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".into()))?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication(
                "Invalid username or password".into(),
            ));
        }

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            created_at: now.to_rfc3339(),
            expires_at: (now + Duration::hours(self.config.session_ttl_hours)).to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(&session.created_at)
        .bind(&session.expires_at)
        .execute(&self.db)
        .await?;

        tracing::info!(username = %user.username, "user logged in");

        Ok((user, session))
    }

    /// Resolve a session token to its user; expired or unknown tokens fail.
    ///
    /// An expired token also deletes its own row here, so stale sessions
    /// disappear on presentation rather than waiting for the purge interval.
    pub async fn validate(&self, token: &str) -> Result<User> {
        let now = Utc::now().to_rfc3339();

        let found = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM sessions WHERE token = ? AND expires_at > ?",
        )
        .bind(token)
        .bind(&now)
        .fetch_optional(&self.db)
        .await?;

        let Some(user_id) = found else {
            sqlx::query("DELETE FROM sessions WHERE token = ? AND expires_at <= ?")
                .bind(token)
                .bind(&now)
                .execute(&self.db)
                .await?;
            return Err(AppError::Authentication("Invalid or expired session".into()));
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid or expired session".into()))?;

        Ok(user)
    }

    /// Drop a session. Idempotent; unknown tokens are fine.
    pub async fn logout(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Remove expired sessions; returns how many were dropped.
    pub async fn purge_expired(&self) -> Result<u64> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(&now)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".into(),
            bind_address: "127.0.0.1:0".into(),
            upload_dir: "uploads".into(),
            session_ttl_hours: 24,
            admin_username: "admin".into(),
            admin_password: None,
            subnet_prefix: "192.168.3".into(),
            ip_range_start: 1,
            ip_range_end: 254,
            ip_scan_limit: 1500,
        }
    }

    async fn insert_user(pool: &SqlitePool, username: &str, password: &str) {
        let hash = SessionService::hash_password(password).unwrap();
        sqlx::query(
            "INSERT INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, 1, ?)",
        )
        .bind(username)
        .bind(hash)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await
        .unwrap();
    }

    #[test]
    fn test_password_hashing() {
        let hash = SessionService::hash_password("secret123").unwrap();
        assert!(SessionService::verify_password("secret123", &hash).unwrap());
        assert!(!SessionService::verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_login_and_validate() {
        let pool = crate::db::test_pool().await;
        insert_user(&pool, "admin", "hunter2").await;

        let service = SessionService::new(pool, test_config());
        let (user, session) = service.login("admin", "hunter2").await.unwrap();
        assert_eq!(user.username, "admin");

        let validated = service.validate(&session.token).await.unwrap();
        assert_eq!(validated.id, user.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let pool = crate::db::test_pool().await;
        insert_user(&pool, "admin", "hunter2").await;

        let service = SessionService::new(pool, test_config());
        assert!(service.login("admin", "nope").await.is_err());
        assert!(service.login("ghost", "hunter2").await.is_err());
    }

    #[tokio::test]
    async fn test_logout_invalidates_and_is_idempotent() {
        let pool = crate::db::test_pool().await;
        insert_user(&pool, "admin", "hunter2").await;

        let service = SessionService::new(pool, test_config());
        let (_, session) = service.login("admin", "hunter2").await.unwrap();

        service.logout(&session.token).await.unwrap();
        assert!(service.validate(&session.token).await.is_err());
        // Second logout of the same token is fine
        service.logout(&session.token).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_sessions_rejected_and_purged() {
        let pool = crate::db::test_pool().await;
        insert_user(&pool, "admin", "hunter2").await;

        let past = (Utc::now() - Duration::hours(1)).to_rfc3339();
        for token in ["stale-a", "stale-b"] {
            sqlx::query(
                "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, 1, ?, ?)",
            )
            .bind(token)
            .bind(&past)
            .bind(&past)
            .execute(&pool)
            .await
            .unwrap();
        }

        let service = SessionService::new(pool.clone(), test_config());

        // Presenting an expired token fails and removes that row on the spot
        assert!(service.validate("stale-a").await.is_err());
        let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 1);

        // The sweep catches whatever was never presented again
        assert_eq!(service.purge_expired().await.unwrap(), 1);
    }
}
