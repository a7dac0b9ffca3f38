//! Camera model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Camera entity (hard delete only)
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Camera {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    pub serial: String,
    pub area: String,
    pub status: String,
    pub attachment: String,
}

/// Mutable camera fields for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CameraFields {
    pub brand: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    pub serial: String,
    pub area: String,
    pub status: String,
}
