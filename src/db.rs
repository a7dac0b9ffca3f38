//! Database connection pool setup and schema initialization.

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Schema statements, applied idempotently at startup.
///
/// The asset tables keep their historical names; every text column defaults
/// to the empty string since blank values are accepted everywhere.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS equipos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL DEFAULT '',
        invoice_number TEXT NOT NULL DEFAULT '',
        mac TEXT NOT NULL DEFAULT '',
        ip TEXT NOT NULL DEFAULT '',
        brand TEXT NOT NULL DEFAULT '',
        model TEXT NOT NULL DEFAULT '',
        serial TEXT NOT NULL DEFAULT '',
        purchase_date TEXT NOT NULL DEFAULT '',
        assigned_user TEXT NOT NULL DEFAULT '',
        domain_user TEXT NOT NULL DEFAULT '',
        in_domain INTEGER NOT NULL DEFAULT 0,
        has_antivirus INTEGER NOT NULL DEFAULT 0,
        disk_encrypted INTEGER NOT NULL DEFAULT 0,
        internet_access INTEGER NOT NULL DEFAULT 0,
        attachment TEXT NOT NULL DEFAULT '',
        registered_at TEXT NOT NULL DEFAULT '',
        company TEXT NOT NULL DEFAULT '',
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS componentes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        workstation_id INTEGER NOT NULL,
        name TEXT NOT NULL DEFAULT '',
        version TEXT NOT NULL DEFAULT '',
        serial TEXT NOT NULL DEFAULT '',
        product_id TEXT NOT NULL DEFAULT '',
        license_key TEXT NOT NULL DEFAULT '',
        vendor TEXT NOT NULL DEFAULT '',
        vendor_applies INTEGER NOT NULL DEFAULT 0,
        purchase_date TEXT NOT NULL DEFAULT '',
        expiry_date TEXT NOT NULL DEFAULT '',
        attachment TEXT NOT NULL DEFAULT '',
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS impresoras (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand TEXT NOT NULL DEFAULT '',
        model TEXT NOT NULL DEFAULT '',
        mac TEXT NOT NULL DEFAULT '',
        ip TEXT NOT NULL DEFAULT '',
        serial TEXT NOT NULL DEFAULT '',
        area TEXT NOT NULL DEFAULT '',
        attachment TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS camaras (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand TEXT NOT NULL DEFAULT '',
        model TEXT NOT NULL DEFAULT '',
        mac TEXT NOT NULL DEFAULT '',
        ip TEXT NOT NULL DEFAULT '',
        serial TEXT NOT NULL DEFAULT '',
        area TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT '',
        attachment TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS otros (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL DEFAULT '',
        brand TEXT NOT NULL DEFAULT '',
        model TEXT NOT NULL DEFAULT '',
        mac TEXT NOT NULL DEFAULT '',
        ip TEXT NOT NULL DEFAULT '',
        serial TEXT NOT NULL DEFAULT '',
        area TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        attachment TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        expires_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_equipos_ip ON equipos(ip)",
    "CREATE INDEX IF NOT EXISTS idx_impresoras_ip ON impresoras(ip)",
    "CREATE INDEX IF NOT EXISTS idx_camaras_ip ON camaras(ip)",
    "CREATE INDEX IF NOT EXISTS idx_otros_ip ON otros(ip)",
    "CREATE INDEX IF NOT EXISTS idx_componentes_workstation ON componentes(workstation_id)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at)",
];

/// Create all tables and indexes if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// In-memory pool for unit tests. A single connection is mandatory here:
/// every new connection to `sqlite::memory:` opens its own empty database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    init_schema(&pool).await.expect("schema init");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let pool = test_pool().await;
        // Running it again must not fail
        init_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_all_tables_exist() {
        let pool = test_pool().await;
        for table in ["equipos", "componentes", "impresoras", "camaras", "otros", "users", "sessions"] {
            let name: Option<String> = sqlx::query_scalar(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            )
            .bind(table)
            .fetch_optional(&pool)
            .await
            .unwrap();
            assert_eq!(name.as_deref(), Some(table), "missing table {table}");
        }
    }
}
