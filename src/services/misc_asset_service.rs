//! Miscellaneous asset registry service.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::misc_asset::{MiscAsset, MiscAssetFields};

const COLUMNS: &str = "id, name, brand, model, mac, ip, serial, area, description, attachment";

/// Miscellaneous asset service
pub struct MiscAssetService {
    db: SqlitePool,
}

impl MiscAssetService {
    /// Create a new miscellaneous asset service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert an asset and return its id.
    pub async fn create(&self, fields: &MiscAssetFields) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO otros (name, brand, model, mac, ip, serial, area, description, attachment) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, '')",
        )
        .bind(&fields.name)
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.serial)
        .bind(&fields.area)
        .bind(&fields.description)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get an asset by id; `None` when the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<MiscAsset>> {
        let row =
            sqlx::query_as::<_, MiscAsset>(&format!("SELECT {COLUMNS} FROM otros WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(row)
    }

    /// List every asset.
    pub async fn list_all(&self) -> Result<Vec<MiscAsset>> {
        let rows = sqlx::query_as::<_, MiscAsset>(&format!("SELECT {COLUMNS} FROM otros"))
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Replace all mutable fields; silent no-op for a missing id.
    pub async fn update(&self, id: i64, fields: &MiscAssetFields) -> Result<()> {
        sqlx::query(
            "UPDATE otros SET name = ?, brand = ?, model = ?, mac = ?, ip = ?, serial = ?, \
             area = ?, description = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.serial)
        .bind(&fields.area)
        .bind(&fields.description)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hard-delete an asset. Idempotent.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM otros WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Update only the attachment pointer; empty string clears it.
    pub async fn replace_attachment(&self, id: i64, path: &str) -> Result<()> {
        sqlx::query("UPDATE otros SET attachment = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
