//! Camera registry service.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::camera::{Camera, CameraFields};

const COLUMNS: &str = "id, brand, model, mac, ip, serial, area, status, attachment";

/// Camera service
pub struct CameraService {
    db: SqlitePool,
}

impl CameraService {
    /// Create a new camera service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a camera and return its id.
    pub async fn create(&self, fields: &CameraFields) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO camaras (brand, model, mac, ip, serial, area, status, attachment) \
             VALUES (?, ?, ?, ?, ?, ?, ?, '')",
        )
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.serial)
        .bind(&fields.area)
        .bind(&fields.status)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a camera by id; `None` when the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Camera>> {
        let row =
            sqlx::query_as::<_, Camera>(&format!("SELECT {COLUMNS} FROM camaras WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(row)
    }

    /// List every camera.
    pub async fn list_all(&self) -> Result<Vec<Camera>> {
        let rows = sqlx::query_as::<_, Camera>(&format!("SELECT {COLUMNS} FROM camaras"))
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Replace all mutable fields; silent no-op for a missing id.
    pub async fn update(&self, id: i64, fields: &CameraFields) -> Result<()> {
        sqlx::query(
            "UPDATE camaras SET brand = ?, model = ?, mac = ?, ip = ?, serial = ?, area = ?, \
             status = ? WHERE id = ?",
        )
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.serial)
        .bind(&fields.area)
        .bind(&fields.status)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hard-delete a camera. Idempotent.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM camaras WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Update only the attachment pointer; empty string clears it.
    pub async fn replace_attachment(&self, id: i64, path: &str) -> Result<()> {
        sqlx::query("UPDATE camaras SET attachment = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
