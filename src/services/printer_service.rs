//! Printer registry service.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::printer::{Printer, PrinterFields};

const COLUMNS: &str = "id, brand, model, mac, ip, serial, area, attachment";

/// Printer service
pub struct PrinterService {
    db: SqlitePool,
}

impl PrinterService {
    /// Create a new printer service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a printer and return its id.
    pub async fn create(&self, fields: &PrinterFields) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO impresoras (brand, model, mac, ip, serial, area, attachment) \
             VALUES (?, ?, ?, ?, ?, ?, '')",
        )
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.serial)
        .bind(&fields.area)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a printer by id; `None` when the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Printer>> {
        let row = sqlx::query_as::<_, Printer>(&format!(
            "SELECT {COLUMNS} FROM impresoras WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// List every printer.
    pub async fn list_all(&self) -> Result<Vec<Printer>> {
        let rows = sqlx::query_as::<_, Printer>(&format!("SELECT {COLUMNS} FROM impresoras"))
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Replace all mutable fields; silent no-op for a missing id.
    pub async fn update(&self, id: i64, fields: &PrinterFields) -> Result<()> {
        sqlx::query(
            "UPDATE impresoras SET brand = ?, model = ?, mac = ?, ip = ?, serial = ?, area = ? \
             WHERE id = ?",
        )
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.serial)
        .bind(&fields.area)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hard-delete a printer. Idempotent.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM impresoras WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Update only the attachment pointer; empty string clears it.
    pub async fn replace_attachment(&self, id: i64, path: &str) -> Result<()> {
        sqlx::query("UPDATE impresoras SET attachment = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
