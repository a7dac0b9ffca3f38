//! API module - HTTP handlers and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;

use crate::config::Config;
use crate::storage::FilesystemStore;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: SqlitePool,
    pub store: FilesystemStore,
}

impl AppState {
    pub fn new(config: Config, db: SqlitePool) -> Self {
        let store = FilesystemStore::new(config.upload_dir.clone());
        Self { config, db, store }
    }
}

pub type SharedState = Arc<AppState>;
