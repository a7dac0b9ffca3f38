//! Printer management handlers.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

use crate::api::handlers::attachments;
use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::printer::{Printer, PrinterFields};
use crate::services::printer_service::PrinterService;

/// Create printer routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_printers).post(create_printer))
        .route(
            "/:id",
            get(get_printer).put(update_printer).delete(delete_printer),
        )
        .route(
            "/:id/attachment",
            get(download_attachment)
                .post(upload_attachment)
                .delete(delete_attachment),
        )
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

/// Fetch a printer or fail with 404.
async fn fetch_printer(service: &PrinterService, id: i64) -> Result<Printer> {
    service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Printer not found".to_string()))
}

/// List all printers
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/v1/printers",
    tag = "printers",
    responses(
        (status = 200, description = "All printers", body = Vec<Printer>),
    )
)]
pub async fn list_printers(State(state): State<SharedState>) -> Result<Json<Vec<Printer>>> {
    let service = PrinterService::new(state.db.clone());
    Ok(Json(service.list_all().await?))
}

/// Register a printer
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/v1/printers",
    tag = "printers",
    request_body = PrinterFields,
    responses(
        (status = 201, description = "Printer created", body = Printer),
    )
)]
pub async fn create_printer(
    State(state): State<SharedState>,
    Json(payload): Json<PrinterFields>,
) -> Result<(StatusCode, Json<Printer>)> {
    let service = PrinterService::new(state.db.clone());
    let id = service.create(&payload).await?;
    let created = fetch_printer(&service, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a printer by id
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/v1/printers",
    tag = "printers",
    params(("id" = i64, Path, description = "Printer id")),
    responses(
        (status = 200, description = "The printer", body = Printer),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn get_printer(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Printer>> {
    let service = PrinterService::new(state.db.clone());
    let row = fetch_printer(&service, id).await?;
    Ok(Json(row))
}

/// Replace a printer's editable fields
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/v1/printers",
    tag = "printers",
    params(("id" = i64, Path, description = "Printer id")),
    request_body = PrinterFields,
    responses(
        (status = 200, description = "Updated printer", body = Printer),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn update_printer(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<PrinterFields>,
) -> Result<Json<Printer>> {
    let service = PrinterService::new(state.db.clone());
    fetch_printer(&service, id).await?;
    service.update(id, &payload).await?;
    let updated = fetch_printer(&service, id).await?;
    Ok(Json(updated))
}

/// Remove a printer permanently
#[utoipa::path(
    delete,
    path = "/{id}",
    context_path = "/api/v1/printers",
    tag = "printers",
    params(("id" = i64, Path, description = "Printer id")),
    responses(
        (status = 204, description = "Printer removed (or was already gone)"),
    )
)]
pub async fn delete_printer(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = PrinterService::new(state.db.clone());
    let existing = service.get_by_id(id).await?;
    service.delete(id).await?;

    if let Some(row) = existing {
        attachments::discard_stored_file(&state.store, &row.attachment).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the printer's attachment
#[utoipa::path(
    post,
    path = "/{id}/attachment",
    context_path = "/api/v1/printers",
    tag = "printers",
    params(("id" = i64, Path, description = "Printer id")),
    responses(
        (status = 200, description = "Attachment stored", body = Printer),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn upload_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Printer>> {
    let service = PrinterService::new(state.db.clone());
    let existing = fetch_printer(&service, id).await?;

    let (content, filename) = attachments::read_upload(multipart).await?;
    let stored = state.store.save(&filename, content).await?;
    service.replace_attachment(id, &stored).await?;
    attachments::discard_replaced_file(&state.store, &existing.attachment, &stored).await;

    let updated = fetch_printer(&service, id).await?;
    Ok(Json(updated))
}

/// Download the printer's attachment
#[utoipa::path(
    get,
    path = "/{id}/attachment",
    context_path = "/api/v1/printers",
    tag = "printers",
    params(("id" = i64, Path, description = "Printer id")),
    responses(
        (status = 200, description = "Attachment bytes"),
        (status = 404, description = "Unknown id, empty pointer, or missing file"),
    )
)]
pub async fn download_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let service = PrinterService::new(state.db.clone());
    let row = fetch_printer(&service, id).await?;
    if row.attachment.is_empty() {
        return Err(AppError::NotFound("Attachment not found".to_string()));
    }
    let content = state.store.open(&row.attachment).await?;
    attachments::download_response(&row.attachment, content)
}

/// Detach and discard the printer's attachment
#[utoipa::path(
    delete,
    path = "/{id}/attachment",
    context_path = "/api/v1/printers",
    tag = "printers",
    params(("id" = i64, Path, description = "Printer id")),
    responses(
        (status = 204, description = "Attachment cleared"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn delete_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = PrinterService::new(state.db.clone());
    let row = fetch_printer(&service, id).await?;

    service.replace_attachment(id, "").await?;
    attachments::discard_stored_file(&state.store, &row.attachment).await;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_printers,
        create_printer,
        get_printer,
        update_printer,
        delete_printer,
        upload_attachment,
        download_attachment,
        delete_attachment,
    ),
    components(schemas(Printer, PrinterFields))
)]
pub struct PrintersApiDoc;
