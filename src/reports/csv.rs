//! CSV rendering.
//!
//! Output starts with a UTF-8 BOM so spreadsheet imports detect the
//! encoding and accented characters survive.

use crate::error::{AppError, Result};

use super::Report;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Render a report as CSV bytes: header row, then one record per data row.
pub fn render(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(&report.columns)
        .map_err(|e| AppError::Report(e.to_string()))?;
    for row in &report.rows {
        writer
            .write_record(row)
            .map_err(|e| AppError::Report(e.to_string()))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::Report(e.to_string()))?;

    let mut out = Vec::with_capacity(UTF8_BOM.len() + data.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(&data);
    Ok(out)
}
