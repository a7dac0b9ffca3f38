//! Component registry service.
//!
//! Software/license records attached to a workstation. Components follow the
//! same contract as workstations (soft delete, silent no-op updates,
//! idempotent hard delete) but are listed per owning workstation.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::component::{Component, ComponentFields};

const COLUMNS: &str = "id, workstation_id, name, version, serial, product_id, license_key, \
     vendor, vendor_applies, purchase_date, expiry_date, attachment, active";

/// Component service
pub struct ComponentService {
    db: SqlitePool,
}

impl ComponentService {
    /// Create a new component service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a component under a workstation and return its id.
    ///
    /// The owning workstation id is not validated; orphan components are
    /// representable by design since workstation deletion never cascades.
    pub async fn create(&self, workstation_id: i64, fields: &ComponentFields) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO componentes (workstation_id, name, version, serial, product_id, \
             license_key, vendor, vendor_applies, purchase_date, expiry_date, attachment, active) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, '', 1)",
        )
        .bind(workstation_id)
        .bind(&fields.name)
        .bind(&fields.version)
        .bind(&fields.serial)
        .bind(&fields.product_id)
        .bind(&fields.license_key)
        .bind(&fields.vendor)
        .bind(fields.vendor_applies)
        .bind(&fields.purchase_date)
        .bind(&fields.expiry_date)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a component by id; `None` when the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Component>> {
        let row = sqlx::query_as::<_, Component>(&format!(
            "SELECT {COLUMNS} FROM componentes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// List the components owned by a workstation.
    pub async fn list_by_workstation(&self, workstation_id: i64) -> Result<Vec<Component>> {
        let rows = sqlx::query_as::<_, Component>(&format!(
            "SELECT {COLUMNS} FROM componentes WHERE workstation_id = ?"
        ))
        .bind(workstation_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Replace all mutable fields; silent no-op for a missing id.
    pub async fn update(&self, id: i64, fields: &ComponentFields) -> Result<()> {
        sqlx::query(
            "UPDATE componentes SET name = ?, version = ?, serial = ?, product_id = ?, \
             license_key = ?, vendor = ?, vendor_applies = ?, purchase_date = ?, \
             expiry_date = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.version)
        .bind(&fields.serial)
        .bind(&fields.product_id)
        .bind(&fields.license_key)
        .bind(&fields.vendor)
        .bind(fields.vendor_applies)
        .bind(&fields.purchase_date)
        .bind(&fields.expiry_date)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Flip the soft-delete flag.
    pub async fn set_active(&self, id: i64, active: bool) -> Result<()> {
        sqlx::query("UPDATE componentes SET active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Hard-delete a component. Idempotent.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM componentes WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Update only the attachment pointer; empty string clears it.
    pub async fn replace_attachment(&self, id: i64, path: &str) -> Result<()> {
        sqlx::query("UPDATE componentes SET attachment = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
