//! Printer model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Printer entity (hard delete only, no soft-delete flag)
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Printer {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    pub serial: String,
    pub area: String,
    pub attachment: String,
}

/// Mutable printer fields for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PrinterFields {
    pub brand: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    pub serial: String,
    pub area: String,
}
