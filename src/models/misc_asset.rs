//! Miscellaneous asset model (devices outside the other categories).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Miscellaneous asset entity (hard delete only)
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct MiscAsset {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    pub serial: String,
    pub area: String,
    pub description: String,
    pub attachment: String,
}

/// Mutable miscellaneous-asset fields for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MiscAssetFields {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    pub serial: String,
    pub area: String,
    pub description: String,
}
