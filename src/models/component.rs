//! Component model (software/licenses installed on a workstation).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Component entity
///
/// Owned by a workstation but deleted only through its own explicit
/// operation; removing the workstation does not cascade.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Component {
    pub id: i64,
    pub workstation_id: i64,
    pub name: String,
    pub version: String,
    pub serial: String,
    pub product_id: String,
    pub license_key: String,
    pub vendor: String,
    pub vendor_applies: bool,
    pub purchase_date: String,
    pub expiry_date: String,
    pub attachment: String,
    pub active: bool,
}

/// Mutable component fields for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ComponentFields {
    pub name: String,
    pub version: String,
    pub serial: String,
    pub product_id: String,
    pub license_key: String,
    pub vendor: String,
    pub vendor_applies: bool,
    pub purchase_date: String,
    pub expiry_date: String,
}
