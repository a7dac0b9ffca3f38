//! Tabular report rendering.
//!
//! `Report` is the renderer-agnostic shape produced by the report service;
//! the submodules turn it into CSV or PDF bytes.

pub mod csv;
pub mod pdf;

/// A column-projected report ready for rendering.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Relative width of a column, by header. Text-heavy columns get more room
/// when the PDF layout divides the page width.
pub(crate) fn column_weight(header: &str) -> f32 {
    match header {
        "Description" => 2.2,
        "Name" | "User" => 2.0,
        "Model" | "MAC" => 1.3,
        "Company" => 1.2,
        "IP" | "Registered" => 1.1,
        "Domain" | "Antivirus" | "Encryption" | "Internet" => 0.9,
        _ => 1.0,
    }
}
