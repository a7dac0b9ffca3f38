//! Camera management handlers.

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
use crate::models::camera::{Camera, CameraFields};
use crate::services::camera_service::CameraService;

/// Create camera routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_cameras).post(create_camera))
        .route(
            "/:id",
            get(get_camera).put(update_camera).delete(delete_camera),
        )
        .route(
            "/:id/attachment",
            get(download_attachment)
                .post(upload_attachment)
                .delete(delete_attachment),
        )
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

/// Fetch a camera or fail with 404.
async fn fetch_camera(service: &CameraService, id: i64) -> Result<Camera> {
    service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Camera not found".to_string()))
}

/// List all cameras
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    responses(
        (status = 200, description = "All cameras", body = Vec<Camera>),
    )
)]
pub async fn list_cameras(State(state): State<SharedState>) -> Result<Json<Vec<Camera>>> {
    let service = CameraService::new(state.db.clone());
    Ok(Json(service.list_all().await?))
}

/// Register a camera
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    request_body = CameraFields,
    responses(
        (status = 201, description = "Camera created", body = Camera),
    )
)]
pub async fn create_camera(
    State(state): State<SharedState>,
    Json(payload): Json<CameraFields>,
) -> Result<(StatusCode, Json<Camera>)> {
    let service = CameraService::new(state.db.clone());
    let id = service.create(&payload).await?;
    let created = fetch_camera(&service, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a camera by id
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    params(("id" = i64, Path, description = "Camera id")),
    responses(
        (status = 200, description = "The camera", body = Camera),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn get_camera(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Camera>> {
    let service = CameraService::new(state.db.clone());
    let row = fetch_camera(&service, id).await?;
    Ok(Json(row))
}

/// Replace a camera's editable fields
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    params(("id" = i64, Path, description = "Camera id")),
    request_body = CameraFields,
    responses(
        (status = 200, description = "Updated camera", body = Camera),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn update_camera(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<CameraFields>,
) -> Result<Json<Camera>> {
    let service = CameraService::new(state.db.clone());
    fetch_camera(&service, id).await?;
    service.update(id, &payload).await?;
    let updated = fetch_camera(&service, id).await?;
    Ok(Json(updated))
}

/// Remove a camera permanently
#[utoipa::path(
    delete,
    path = "/{id}",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    params(("id" = i64, Path, description = "Camera id")),
    responses(
        (status = 204, description = "Camera removed (or was already gone)"),
    )
)]
pub async fn delete_camera(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = CameraService::new(state.db.clone());
    let existing = service.get_by_id(id).await?;
    service.delete(id).await?;

    if let Some(row) = existing {
        attachments::discard_stored_file(&state.store, &row.attachment).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the camera's attachment
#[utoipa::path(
    post,
    path = "/{id}/attachment",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    params(("id" = i64, Path, description = "Camera id")),
    responses(
        (status = 200, description = "Attachment stored", body = Camera),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn upload_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Camera>> {
    let service = CameraService::new(state.db.clone());
    let existing = fetch_camera(&service, id).await?;

    let (content, filename) = attachments::read_upload(multipart).await?;
    let stored = state.store.save(&filename, content).await?;
    service.replace_attachment(id, &stored).await?;
    attachments::discard_replaced_file(&state.store, &existing.attachment, &stored).await;

    let updated = fetch_camera(&service, id).await?;
    Ok(Json(updated))
}

/// Download the camera's attachment
#[utoipa::path(
    get,
    path = "/{id}/attachment",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    params(("id" = i64, Path, description = "Camera id")),
    responses(
        (status = 200, description = "Attachment bytes"),
        (status = 404, description = "Unknown id, empty pointer, or missing file"),
    )
)]
pub async fn download_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let service = CameraService::new(state.db.clone());
    let row = fetch_camera(&service, id).await?;
    if row.attachment.is_empty() {
        return Err(AppError::NotFound("Attachment not found".to_string()));
    }
    let content = state.store.open(&row.attachment).await?;
    attachments::download_response(&row.attachment, content)
}

/// Detach and discard the camera's attachment
#[utoipa::path(
    delete,
    path = "/{id}/attachment",
    context_path = "/api/v1/cameras",
    tag = "cameras",
    params(("id" = i64, Path, description = "Camera id")),
    responses(
        (status = 204, description = "Attachment cleared"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn delete_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = CameraService::new(state.db.clone());
    let row = fetch_camera(&service, id).await?;

    service.replace_attachment(id, "").await?;
    attachments::discard_stored_file(&state.store, &row.attachment).await;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_cameras,
        create_camera,
        get_camera,
        update_camera,
        delete_camera,
        upload_attachment,
        download_attachment,
        delete_attachment,
    ),
    components(schemas(Camera, CameraFields))
)]
pub struct CamerasApiDoc;
