//! Workstation model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Workstation entity
///
/// `registered_at` is stamped once at creation and never updated; `active`
/// is the soft-delete flag toggled from the UI instead of a hard delete.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Workstation {
    pub id: i64,
    pub name: String,
    pub invoice_number: String,
    pub mac: String,
    pub ip: String,
    pub brand: String,
    pub model: String,
    pub serial: String,
    pub purchase_date: String,
    pub assigned_user: String,
    pub domain_user: String,
    pub in_domain: bool,
    pub has_antivirus: bool,
    pub disk_encrypted: bool,
    pub internet_access: bool,
    pub attachment: String,
    pub registered_at: String,
    pub company: String,
    pub active: bool,
}

/// Mutable workstation fields for create and update.
///
/// The attachment pointer, registration date and active flag are managed
/// through their own operations and deliberately absent here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WorkstationFields {
    pub name: String,
    pub invoice_number: String,
    pub mac: String,
    pub ip: String,
    pub brand: String,
    pub model: String,
    pub serial: String,
    pub purchase_date: String,
    pub assigned_user: String,
    pub domain_user: String,
    pub in_domain: bool,
    pub has_antivirus: bool,
    pub disk_encrypted: bool,
    pub internet_access: bool,
    pub company: String,
}
