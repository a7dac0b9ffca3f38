//! Report download handlers.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use utoipa::OpenApi;

use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::reports::{self, Report};
use crate::services::report_service::ReportService;

/// Create report routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/:collection/csv", get(download_csv))
        .route("/:collection/pdf", get(download_pdf))
}

/// Project the named collection into a report, or 404 for unknown names.
async fn build_report(state: &SharedState, collection: &str) -> Result<Report> {
    let service = ReportService::new(state.db.clone());
    match collection {
        "workstations" => service.workstations().await,
        "printers" => service.printers().await,
        "cameras" => service.cameras().await,
        "misc" => service.misc_assets().await,
        other => Err(AppError::NotFound(format!("No report for '{other}'"))),
    }
}

fn file_response(filename: &str, content_type: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Download a collection as CSV
#[utoipa::path(
    get,
    path = "/{collection}/csv",
    context_path = "/api/v1/reports",
    tag = "reports",
    params(("collection" = String, Path, description = "workstations | printers | cameras | misc")),
    responses(
        (status = 200, description = "CSV bytes (UTF-8 with BOM)"),
        (status = 404, description = "Unknown collection"),
    )
)]
pub async fn download_csv(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
) -> Result<Response> {
    let report = build_report(&state, &collection).await?;
    let bytes = reports::csv::render(&report)?;
    Ok(file_response(
        &format!("{collection}.csv"),
        "text/csv; charset=utf-8",
        bytes,
    ))
}

/// Download a collection as PDF
#[utoipa::path(
    get,
    path = "/{collection}/pdf",
    context_path = "/api/v1/reports",
    tag = "reports",
    params(("collection" = String, Path, description = "workstations | printers | cameras | misc")),
    responses(
        (status = 200, description = "PDF bytes"),
        (status = 404, description = "Unknown collection"),
    )
)]
pub async fn download_pdf(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
) -> Result<Response> {
    let report = build_report(&state, &collection).await?;
    let bytes = reports::pdf::render(&report)?;
    Ok(file_response(
        &format!("{collection}.pdf"),
        "application/pdf",
        bytes,
    ))
}

#[derive(OpenApi)]
#[openapi(paths(download_csv, download_pdf))]
pub struct ReportsApiDoc;
