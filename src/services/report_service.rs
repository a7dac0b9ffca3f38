//! Report assembly.
//!
//! Projects each collection into the fixed column layout consumed by the
//! CSV and PDF renderers. Workstation reports include inactive rows on
//! purpose: the export is the full historical inventory.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::reports::Report;
use crate::services::camera_service::CameraService;
use crate::services::misc_asset_service::MiscAssetService;
use crate::services::printer_service::PrinterService;
use crate::services::workstation_service::WorkstationService;

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Date columns keep only the day part of whatever was stored.
fn date_part(value: &str) -> String {
    value.chars().take(10).collect()
}

/// Report service
pub struct ReportService {
    db: SqlitePool,
}

impl ReportService {
    /// Create a new report service
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Full workstation inventory.
    pub async fn workstations(&self) -> Result<Report> {
        let rows = WorkstationService::new(self.db.clone()).list_all().await?;

        Ok(Report {
            title: "Workstation Inventory".into(),
            columns: vec![
                "Company",
                "Name",
                "Brand",
                "Model",
                "User",
                "Domain",
                "Antivirus",
                "Encryption",
                "Internet",
                "Registered",
            ],
            rows: rows
                .iter()
                .map(|w| {
                    vec![
                        or_na(&w.company),
                        w.name.clone(),
                        w.brand.clone(),
                        w.model.clone(),
                        w.assigned_user.clone(),
                        yes_no(w.in_domain),
                        yes_no(w.has_antivirus),
                        yes_no(w.disk_encrypted),
                        yes_no(w.internet_access),
                        date_part(&w.registered_at),
                    ]
                })
                .collect(),
        })
    }

    /// Full printer inventory.
    pub async fn printers(&self) -> Result<Report> {
        let rows = PrinterService::new(self.db.clone()).list_all().await?;

        Ok(Report {
            title: "Printer Inventory".into(),
            columns: vec!["Brand", "Model", "MAC", "IP", "Serial", "Area"],
            rows: rows
                .iter()
                .map(|p| {
                    vec![
                        p.brand.clone(),
                        p.model.clone(),
                        p.mac.clone(),
                        p.ip.clone(),
                        p.serial.clone(),
                        p.area.clone(),
                    ]
                })
                .collect(),
        })
    }

    /// Full camera inventory.
    pub async fn cameras(&self) -> Result<Report> {
        let rows = CameraService::new(self.db.clone()).list_all().await?;

        Ok(Report {
            title: "Camera Inventory".into(),
            columns: vec!["Brand", "Model", "MAC", "IP", "Serial", "Area", "Status"],
            rows: rows
                .iter()
                .map(|c| {
                    vec![
                        c.brand.clone(),
                        c.model.clone(),
                        c.mac.clone(),
                        c.ip.clone(),
                        c.serial.clone(),
                        c.area.clone(),
                        c.status.clone(),
                    ]
                })
                .collect(),
        })
    }

    /// Full miscellaneous asset inventory.
    pub async fn misc_assets(&self) -> Result<Report> {
        let rows = MiscAssetService::new(self.db.clone()).list_all().await?;

        Ok(Report {
            title: "Miscellaneous Asset Inventory".into(),
            columns: vec!["Name", "Area", "IP", "Brand", "Model", "Serial", "Description"],
            rows: rows
                .iter()
                .map(|m| {
                    vec![
                        m.name.clone(),
                        m.area.clone(),
                        m.ip.clone(),
                        m.brand.clone(),
                        m.model.clone(),
                        m.serial.clone(),
                        m.description.clone(),
                    ]
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workstation::WorkstationFields;
    use crate::services::workstation_service::WorkstationService;

    #[test]
    fn test_yes_no_and_na() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
        assert_eq!(or_na(""), "N/A");
        assert_eq!(or_na("Acme"), "Acme");
    }

    #[test]
    fn test_date_part_truncates() {
        assert_eq!(date_part("2024-05-17T08:30:00"), "2024-05-17");
        assert_eq!(date_part("2024"), "2024");
    }

    #[tokio::test]
    async fn test_workstation_report_projection() {
        let pool = crate::db::test_pool().await;
        let workstations = WorkstationService::new(pool.clone());

        let fields = WorkstationFields {
            name: "WS-001".into(),
            brand: "Dell".into(),
            model: "OptiPlex".into(),
            assigned_user: "jdoe".into(),
            in_domain: true,
            has_antivirus: false,
            ..Default::default()
        };
        let id = workstations.create(&fields).await.unwrap();
        // Inactive rows still appear in the report
        workstations.set_active(id, false).await.unwrap();

        let report = ReportService::new(pool).workstations().await.unwrap();
        assert_eq!(report.columns.len(), 10);
        assert_eq!(report.rows.len(), 1);

        let row = &report.rows[0];
        assert_eq!(row[0], "N/A"); // empty company
        assert_eq!(row[1], "WS-001");
        assert_eq!(row[5], "Yes"); // domain
        assert_eq!(row[6], "No"); // antivirus
        assert_eq!(row[9].len(), 10); // date part only
    }

    #[tokio::test]
    async fn test_misc_report_aligns_named_fields() {
        let pool = crate::db::test_pool().await;
        sqlx::query(
            "INSERT INTO otros (name, brand, model, mac, ip, serial, area, description) \
             VALUES ('Switch', 'Cisco', 'C9200', 'AA:BB', '10.0.0.2', 'SN9', 'IT closet', '48 ports')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let report = ReportService::new(pool).misc_assets().await.unwrap();
        let row = &report.rows[0];
        assert_eq!(report.columns[0], "Name");
        assert_eq!(row[0], "Switch");
        assert_eq!(row[1], "IT closet"); // Area column holds the area
        assert_eq!(row[2], "10.0.0.2"); // IP column holds the IP
        assert_eq!(row[6], "48 ports");
    }
}
