//! Workstation registry service.
//!
//! CRUD, soft-delete and search over the `equipos` table. The search
//! predicate is conjunctive: free-text substring over name/IP/assigned user,
//! optional exact company match, optional active-only restriction, with
//! each clause independently skippable.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::workstation::{Workstation, WorkstationFields};

const COLUMNS: &str = "id, name, invoice_number, mac, ip, brand, model, serial, purchase_date, \
     assigned_user, domain_user, in_domain, has_antivirus, disk_encrypted, internet_access, \
     attachment, registered_at, company, active";

/// Workstation service
pub struct WorkstationService {
    db: SqlitePool,
}

impl WorkstationService {
    /// Create a new workstation service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a workstation and return its id.
    ///
    /// Stamps `registered_at` with today's date; the stamp never changes
    /// afterwards. New rows start active with an empty attachment pointer.
    pub async fn create(&self, fields: &WorkstationFields) -> Result<i64> {
        let registered_at = Utc::now().format("%Y-%m-%d").to_string();

        let result = sqlx::query(
            "INSERT INTO equipos (name, invoice_number, mac, ip, brand, model, serial, \
             purchase_date, assigned_user, domain_user, in_domain, has_antivirus, \
             disk_encrypted, internet_access, attachment, registered_at, company, active) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, '', ?, ?, 1)",
        )
        .bind(&fields.name)
        .bind(&fields.invoice_number)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.serial)
        .bind(&fields.purchase_date)
        .bind(&fields.assigned_user)
        .bind(&fields.domain_user)
        .bind(fields.in_domain)
        .bind(fields.has_antivirus)
        .bind(fields.disk_encrypted)
        .bind(fields.internet_access)
        .bind(&registered_at)
        .bind(&fields.company)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a workstation by id; `None` when the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Workstation>> {
        let row = sqlx::query_as::<_, Workstation>(&format!(
            "SELECT {COLUMNS} FROM equipos WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// List every workstation, active or not. Store order, no pagination.
    pub async fn list_all(&self) -> Result<Vec<Workstation>> {
        let rows = sqlx::query_as::<_, Workstation>(&format!("SELECT {COLUMNS} FROM equipos"))
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Replace all mutable fields. A missing id is a silent no-op; callers
    /// that need feedback check existence first.
    pub async fn update(&self, id: i64, fields: &WorkstationFields) -> Result<()> {
        sqlx::query(
            "UPDATE equipos SET name = ?, invoice_number = ?, mac = ?, ip = ?, brand = ?, \
             model = ?, serial = ?, purchase_date = ?, assigned_user = ?, domain_user = ?, \
             in_domain = ?, has_antivirus = ?, disk_encrypted = ?, internet_access = ?, \
             company = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.invoice_number)
        .bind(&fields.mac)
        .bind(&fields.ip)
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.serial)
        .bind(&fields.purchase_date)
        .bind(&fields.assigned_user)
        .bind(&fields.domain_user)
        .bind(fields.in_domain)
        .bind(fields.has_antivirus)
        .bind(fields.disk_encrypted)
        .bind(fields.internet_access)
        .bind(&fields.company)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Flip the soft-delete flag.
    pub async fn set_active(&self, id: i64, active: bool) -> Result<()> {
        sqlx::query("UPDATE equipos SET active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Hard-delete a workstation. Idempotent; components are untouched.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM equipos WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Update only the attachment pointer; empty string clears it.
    /// The filesystem is never touched here.
    pub async fn replace_attachment(&self, id: i64, path: &str) -> Result<()> {
        sqlx::query("UPDATE equipos SET attachment = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Search workstations.
    ///
    /// `query` matches name, IP or assigned user as a case-insensitive
    /// substring; empty means match-all, not match-nothing. An empty
    /// `company` filter is skipped the same way. All present clauses are
    /// ANDed, so `search("", None, true)` equals `list_all` restricted to
    /// active rows.
    pub async fn search(
        &self,
        query: &str,
        company: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Workstation>> {
        let mut sql = format!("SELECT {COLUMNS} FROM equipos WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if !query.is_empty() {
            sql.push_str(" AND (name LIKE ? OR ip LIKE ? OR assigned_user LIKE ?)");
            let pattern = format!("%{}%", query);
            binds.push(pattern.clone());
            binds.push(pattern.clone());
            binds.push(pattern);
        }

        if let Some(company) = company {
            if !company.is_empty() {
                sql.push_str(" AND company = ?");
                binds.push(company.to_string());
            }
        }

        if active_only {
            sql.push_str(" AND active = 1");
        }

        let mut q = sqlx::query_as::<_, Workstation>(&sql);
        for bind in &binds {
            q = q.bind(bind);
        }

        let rows = q.fetch_all(&self.db).await?;
        Ok(rows)
    }

    /// Count workstations with the given active flag (dashboard totals).
    pub async fn count_by_active(&self, active: bool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM equipos WHERE active = ?")
            .bind(active)
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }
}
