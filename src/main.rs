//! Asset Registry - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rand::Rng;

use asset_registry::{
    api,
    config::Config,
    db,
    error::Result,
    services::session_service::SessionService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Starting Asset Registry");

    // Connect to database
    let db_pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Create tables and indexes on first boot
    db::init_schema(&db_pool).await?;
    tracing::info!("Database schema ready");

    // Provision admin user on first boot
    provision_admin_user(&db_pool, &config).await?;

    // Create application state
    let state = Arc::new(api::AppState::new(config.clone(), db_pool.clone()));
    state.store.ensure_base_dir().await?;

    // Hourly sweep of expired sessions
    let purge_sessions = SessionService::new(db_pool.clone(), config.clone());
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match purge_sessions.purge_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::info!(purged = n, "expired sessions removed"),
                Err(e) => tracing::warn!(error = %e, "session purge failed"),
            }
        }
    });

    // Build router
    let app = Router::new()
        .merge(api::routes::create_router(state))
        .layer({
            // The session cookie needs credentials, which rules out the
            // wildcard origin; in development the frontend runs on its own
            // port, so that origin is whitelisted explicitly.
            if std::env::var("ENVIRONMENT").unwrap_or_default() == "development" {
                let origins: Vec<_> = std::env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".into())
                    .split(',')
                    .map(|s| s.trim().parse().expect("invalid CORS origin"))
                    .collect();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                        Method::OPTIONS,
                    ])
                    .allow_headers([
                        header::CONTENT_TYPE,
                        header::AUTHORIZATION,
                        header::ACCEPT,
                        header::COOKIE,
                    ])
                    .allow_credentials(true)
            } else {
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        })
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Provision the admin user on first boot.
///
/// Without an `ADMIN_PASSWORD` a random password is generated and logged
/// once; operators are expected to change the variable afterwards.
async fn provision_admin_user(db: &sqlx::SqlitePool, config: &Config) -> Result<()> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(&config.admin_username)
        .fetch_optional(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let (password, generated) = match &config.admin_password {
        Some(p) => (p.clone(), false),
        None => {
            const CHARSET: &[u8] =
                b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789!@#$%&*";
            let mut rng = rand::rng();
            let p: String = (0..20)
                .map(|_| {
                    let idx = rng.random_range(0..CHARSET.len());
                    CHARSET[idx] as char
                })
                .collect();
            (p, true)
        }
    };

    let password_hash = SessionService::hash_password(&password)?;

    sqlx::query(
        "INSERT INTO users (username, password_hash, is_admin, created_at) VALUES (?, ?, 1, ?) \
         ON CONFLICT(username) DO NOTHING",
    )
    .bind(&config.admin_username)
    .bind(&password_hash)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(db)
    .await?;

    if generated {
        tracing::info!(
            "\n\
            ===========================================================\n\
            \n\
              Initial admin user created.\n\
            \n\
              Username:  {}\n\
              Password:  {}\n\
            \n\
              Set ADMIN_PASSWORD to control this credential.\n\
            \n\
            ===========================================================",
            config.admin_username,
            password,
        );
    } else {
        tracing::info!(
            "Admin user '{}' created with password from ADMIN_PASSWORD",
            config.admin_username
        );
    }

    Ok(())
}
