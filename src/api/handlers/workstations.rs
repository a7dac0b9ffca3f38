//! Workstation management handlers.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::dto::SetActiveRequest;
use crate::api::handlers::attachments;
use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::component::{Component, ComponentFields};
use crate::models::workstation::{Workstation, WorkstationFields};
use crate::services::component_service::ComponentService;
use crate::services::workstation_service::WorkstationService;

/// Create workstation routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_workstations).post(create_workstation))
        .route("/counts", get(get_counts))
        .route(
            "/:id",
            get(get_workstation)
                .put(update_workstation)
                .delete(delete_workstation),
        )
        .route("/:id/active", put(set_active))
        .route(
            "/:id/components",
            get(list_components).post(create_component),
        )
        .route(
            "/:id/attachment",
            get(download_attachment)
                .post(upload_attachment)
                .delete(delete_attachment),
        )
        // Attachments are invoices and photos; 32 MB covers them
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListWorkstationsQuery {
    /// Substring matched against name, IP and assigned user
    pub q: Option<String>,
    /// Exact company filter; empty means no filter
    pub company: Option<String>,
    /// Also return soft-deleted rows
    pub include_inactive: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkstationCounts {
    pub active: i64,
    pub inactive: i64,
}

/// Fetch a workstation or fail with 404.
async fn fetch_workstation(service: &WorkstationService, id: i64) -> Result<Workstation> {
    service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workstation not found".to_string()))
}

/// List workstations, filtered
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(ListWorkstationsQuery),
    responses(
        (status = 200, description = "Matching workstations", body = Vec<Workstation>),
    )
)]
pub async fn list_workstations(
    State(state): State<SharedState>,
    Query(query): Query<ListWorkstationsQuery>,
) -> Result<Json<Vec<Workstation>>> {
    let service = WorkstationService::new(state.db.clone());
    let rows = service
        .search(
            query.q.as_deref().unwrap_or(""),
            query.company.as_deref(),
            !query.include_inactive.unwrap_or(false),
        )
        .await?;
    Ok(Json(rows))
}

/// Active/inactive totals for the dashboard
#[utoipa::path(
    get,
    path = "/counts",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    responses(
        (status = 200, description = "Workstation totals", body = WorkstationCounts),
    )
)]
pub async fn get_counts(State(state): State<SharedState>) -> Result<Json<WorkstationCounts>> {
    let service = WorkstationService::new(state.db.clone());
    let active = service.count_by_active(true).await?;
    let inactive = service.count_by_active(false).await?;
    Ok(Json(WorkstationCounts { active, inactive }))
}

/// Register a workstation
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    request_body = WorkstationFields,
    responses(
        (status = 201, description = "Workstation created", body = Workstation),
    )
)]
pub async fn create_workstation(
    State(state): State<SharedState>,
    Json(payload): Json<WorkstationFields>,
) -> Result<(StatusCode, Json<Workstation>)> {
    let service = WorkstationService::new(state.db.clone());
    let id = service.create(&payload).await?;
    let created = fetch_workstation(&service, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a workstation by id
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    responses(
        (status = 200, description = "The workstation", body = Workstation),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn get_workstation(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Workstation>> {
    let service = WorkstationService::new(state.db.clone());
    let row = fetch_workstation(&service, id).await?;
    Ok(Json(row))
}

/// Replace a workstation's editable fields
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    request_body = WorkstationFields,
    responses(
        (status = 200, description = "Updated workstation", body = Workstation),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn update_workstation(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<WorkstationFields>,
) -> Result<Json<Workstation>> {
    let service = WorkstationService::new(state.db.clone());
    fetch_workstation(&service, id).await?;
    service.update(id, &payload).await?;
    let updated = fetch_workstation(&service, id).await?;
    Ok(Json(updated))
}

/// Toggle the soft-delete flag
#[utoipa::path(
    put,
    path = "/{id}/active",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Updated workstation", body = Workstation),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn set_active(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<Workstation>> {
    let service = WorkstationService::new(state.db.clone());
    fetch_workstation(&service, id).await?;
    service.set_active(id, payload.active).await?;
    let updated = fetch_workstation(&service, id).await?;
    Ok(Json(updated))
}

/// Remove a workstation permanently
#[utoipa::path(
    delete,
    path = "/{id}",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    responses(
        (status = 204, description = "Workstation removed (or was already gone)"),
    )
)]
pub async fn delete_workstation(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = WorkstationService::new(state.db.clone());
    let existing = service.get_by_id(id).await?;
    service.delete(id).await?;

    // Row first, file second; a leftover file is harmless
    if let Some(row) = existing {
        attachments::discard_stored_file(&state.store, &row.attachment).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List a workstation's components
#[utoipa::path(
    get,
    path = "/{id}/components",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    responses(
        (status = 200, description = "Components installed on the workstation", body = Vec<Component>),
    )
)]
pub async fn list_components(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Component>>> {
    let service = ComponentService::new(state.db.clone());
    let rows = service.list_by_workstation(id).await?;
    Ok(Json(rows))
}

/// Attach a new component to a workstation
#[utoipa::path(
    post,
    path = "/{id}/components",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    request_body = ComponentFields,
    responses(
        (status = 201, description = "Component created", body = Component),
        (status = 404, description = "Unknown workstation"),
    )
)]
pub async fn create_component(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComponentFields>,
) -> Result<(StatusCode, Json<Component>)> {
    let workstations = WorkstationService::new(state.db.clone());
    fetch_workstation(&workstations, id).await?;

    let components = ComponentService::new(state.db.clone());
    let component_id = components.create(id, &payload).await?;
    let created = components
        .get_by_id(component_id)
        .await?
        .ok_or_else(|| AppError::Internal("Component missing after insert".to_string()))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace the workstation's attachment
#[utoipa::path(
    post,
    path = "/{id}/attachment",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    responses(
        (status = 200, description = "Attachment stored", body = Workstation),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn upload_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Workstation>> {
    let service = WorkstationService::new(state.db.clone());
    let existing = fetch_workstation(&service, id).await?;

    let (content, filename) = attachments::read_upload(multipart).await?;
    let stored = state.store.save(&filename, content).await?;
    service.replace_attachment(id, &stored).await?;
    attachments::discard_replaced_file(&state.store, &existing.attachment, &stored).await;

    let updated = fetch_workstation(&service, id).await?;
    Ok(Json(updated))
}

/// Download the workstation's attachment
#[utoipa::path(
    get,
    path = "/{id}/attachment",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    responses(
        (status = 200, description = "Attachment bytes"),
        (status = 404, description = "Unknown id, empty pointer, or missing file"),
    )
)]
pub async fn download_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let service = WorkstationService::new(state.db.clone());
    let row = fetch_workstation(&service, id).await?;
    if row.attachment.is_empty() {
        return Err(AppError::NotFound("Attachment not found".to_string()));
    }
    let content = state.store.open(&row.attachment).await?;
    attachments::download_response(&row.attachment, content)
}

/// Detach and discard the workstation's attachment
#[utoipa::path(
    delete,
    path = "/{id}/attachment",
    context_path = "/api/v1/workstations",
    tag = "workstations",
    params(("id" = i64, Path, description = "Workstation id")),
    responses(
        (status = 204, description = "Attachment cleared"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn delete_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = WorkstationService::new(state.db.clone());
    let row = fetch_workstation(&service, id).await?;

    service.replace_attachment(id, "").await?;
    attachments::discard_stored_file(&state.store, &row.attachment).await;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_workstations,
        get_counts,
        create_workstation,
        get_workstation,
        update_workstation,
        set_active,
        delete_workstation,
        list_components,
        create_component,
        upload_attachment,
        download_attachment,
        delete_attachment,
    ),
    components(schemas(
        Workstation,
        WorkstationFields,
        WorkstationCounts,
        Component,
        ComponentFields,
    ))
)]
pub struct WorkstationsApiDoc;
