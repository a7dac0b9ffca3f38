//! Component handlers (by component id).
//!
//! Creation and listing live under the owning workstation's routes; this
//! module covers everything addressed by the component's own id.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::api::dto::SetActiveRequest;
use crate::api::handlers::attachments;
use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::component::{Component, ComponentFields};
use crate::services::component_service::ComponentService;

/// Create component routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/:id",
            get(get_component)
                .put(update_component)
                .delete(delete_component),
        )
        .route("/:id/active", put(set_active))
        .route(
            "/:id/attachment",
            get(download_attachment)
                .post(upload_attachment)
                .delete(delete_attachment),
        )
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

/// Fetch a component or fail with 404.
async fn fetch_component(service: &ComponentService, id: i64) -> Result<Component> {
    service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Component not found".to_string()))
}

/// Get a component by id
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    responses(
        (status = 200, description = "The component", body = Component),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn get_component(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Component>> {
    let service = ComponentService::new(state.db.clone());
    let row = fetch_component(&service, id).await?;
    Ok(Json(row))
}

/// Replace a component's editable fields
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    request_body = ComponentFields,
    responses(
        (status = 200, description = "Updated component", body = Component),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn update_component(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComponentFields>,
) -> Result<Json<Component>> {
    let service = ComponentService::new(state.db.clone());
    fetch_component(&service, id).await?;
    service.update(id, &payload).await?;
    let updated = fetch_component(&service, id).await?;
    Ok(Json(updated))
}

/// Toggle the soft-delete flag
#[utoipa::path(
    put,
    path = "/{id}/active",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Updated component", body = Component),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn set_active(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<Component>> {
    let service = ComponentService::new(state.db.clone());
    fetch_component(&service, id).await?;
    service.set_active(id, payload.active).await?;
    let updated = fetch_component(&service, id).await?;
    Ok(Json(updated))
}

/// Remove a component permanently
#[utoipa::path(
    delete,
    path = "/{id}",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    responses(
        (status = 204, description = "Component removed (or was already gone)"),
    )
)]
pub async fn delete_component(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = ComponentService::new(state.db.clone());
    let existing = service.get_by_id(id).await?;
    service.delete(id).await?;

    if let Some(row) = existing {
        attachments::discard_stored_file(&state.store, &row.attachment).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the component's attachment
#[utoipa::path(
    post,
    path = "/{id}/attachment",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    responses(
        (status = 200, description = "Attachment stored", body = Component),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn upload_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Component>> {
    let service = ComponentService::new(state.db.clone());
    let existing = fetch_component(&service, id).await?;

    let (content, filename) = attachments::read_upload(multipart).await?;
    let stored = state.store.save(&filename, content).await?;
    service.replace_attachment(id, &stored).await?;
    attachments::discard_replaced_file(&state.store, &existing.attachment, &stored).await;

    let updated = fetch_component(&service, id).await?;
    Ok(Json(updated))
}

/// Download the component's attachment
#[utoipa::path(
    get,
    path = "/{id}/attachment",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    responses(
        (status = 200, description = "Attachment bytes"),
        (status = 404, description = "Unknown id, empty pointer, or missing file"),
    )
)]
pub async fn download_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let service = ComponentService::new(state.db.clone());
    let row = fetch_component(&service, id).await?;
    if row.attachment.is_empty() {
        return Err(AppError::NotFound("Attachment not found".to_string()));
    }
    let content = state.store.open(&row.attachment).await?;
    attachments::download_response(&row.attachment, content)
}

/// Detach and discard the component's attachment
#[utoipa::path(
    delete,
    path = "/{id}/attachment",
    context_path = "/api/v1/components",
    tag = "components",
    params(("id" = i64, Path, description = "Component id")),
    responses(
        (status = 204, description = "Attachment cleared"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn delete_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = ComponentService::new(state.db.clone());
    let row = fetch_component(&service, id).await?;

    service.replace_attachment(id, "").await?;
    attachments::discard_stored_file(&state.store, &row.attachment).await;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get_component,
        update_component,
        set_active,
        delete_component,
        upload_attachment,
        download_attachment,
        delete_attachment,
    ),
    components(schemas(Component, ComponentFields))
)]
pub struct ComponentsApiDoc;
