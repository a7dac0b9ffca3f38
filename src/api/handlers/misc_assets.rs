//! Miscellaneous asset handlers (switches, access points, UPS units, ...).

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
use crate::models::misc_asset::{MiscAsset, MiscAssetFields};
use crate::services::misc_asset_service::MiscAssetService;

/// Create misc asset routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_misc_assets).post(create_misc_asset))
        .route(
            "/:id",
            get(get_misc_asset)
                .put(update_misc_asset)
                .delete(delete_misc_asset),
        )
        .route(
            "/:id/attachment",
            get(download_attachment)
                .post(upload_attachment)
                .delete(delete_attachment),
        )
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
}

/// Fetch a misc asset or fail with 404.
async fn fetch_misc_asset(service: &MiscAssetService, id: i64) -> Result<MiscAsset> {
    service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))
}

/// List all miscellaneous assets
#[utoipa::path(
    get,
    path = "",
    context_path = "/api/v1/misc",
    tag = "misc",
    responses(
        (status = 200, description = "All miscellaneous assets", body = Vec<MiscAsset>),
    )
)]
pub async fn list_misc_assets(State(state): State<SharedState>) -> Result<Json<Vec<MiscAsset>>> {
    let service = MiscAssetService::new(state.db.clone());
    Ok(Json(service.list_all().await?))
}

/// Register a miscellaneous asset
#[utoipa::path(
    post,
    path = "",
    context_path = "/api/v1/misc",
    tag = "misc",
    request_body = MiscAssetFields,
    responses(
        (status = 201, description = "Asset created", body = MiscAsset),
    )
)]
pub async fn create_misc_asset(
    State(state): State<SharedState>,
    Json(payload): Json<MiscAssetFields>,
) -> Result<(StatusCode, Json<MiscAsset>)> {
    let service = MiscAssetService::new(state.db.clone());
    let id = service.create(&payload).await?;
    let created = fetch_misc_asset(&service, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a miscellaneous asset by id
#[utoipa::path(
    get,
    path = "/{id}",
    context_path = "/api/v1/misc",
    tag = "misc",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "The asset", body = MiscAsset),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn get_misc_asset(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MiscAsset>> {
    let service = MiscAssetService::new(state.db.clone());
    let row = fetch_misc_asset(&service, id).await?;
    Ok(Json(row))
}

/// Replace a miscellaneous asset's editable fields
#[utoipa::path(
    put,
    path = "/{id}",
    context_path = "/api/v1/misc",
    tag = "misc",
    params(("id" = i64, Path, description = "Asset id")),
    request_body = MiscAssetFields,
    responses(
        (status = 200, description = "Updated asset", body = MiscAsset),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn update_misc_asset(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<MiscAssetFields>,
) -> Result<Json<MiscAsset>> {
    let service = MiscAssetService::new(state.db.clone());
    fetch_misc_asset(&service, id).await?;
    service.update(id, &payload).await?;
    let updated = fetch_misc_asset(&service, id).await?;
    Ok(Json(updated))
}

/// Remove a miscellaneous asset permanently
#[utoipa::path(
    delete,
    path = "/{id}",
    context_path = "/api/v1/misc",
    tag = "misc",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Asset removed (or was already gone)"),
    )
)]
pub async fn delete_misc_asset(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = MiscAssetService::new(state.db.clone());
    let existing = service.get_by_id(id).await?;
    service.delete(id).await?;

    if let Some(row) = existing {
        attachments::discard_stored_file(&state.store, &row.attachment).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Replace the asset's attachment
#[utoipa::path(
    post,
    path = "/{id}/attachment",
    context_path = "/api/v1/misc",
    tag = "misc",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Attachment stored", body = MiscAsset),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn upload_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MiscAsset>> {
    let service = MiscAssetService::new(state.db.clone());
    let existing = fetch_misc_asset(&service, id).await?;

    let (content, filename) = attachments::read_upload(multipart).await?;
    let stored = state.store.save(&filename, content).await?;
    service.replace_attachment(id, &stored).await?;
    attachments::discard_replaced_file(&state.store, &existing.attachment, &stored).await;

    let updated = fetch_misc_asset(&service, id).await?;
    Ok(Json(updated))
}

/// Download the asset's attachment
#[utoipa::path(
    get,
    path = "/{id}/attachment",
    context_path = "/api/v1/misc",
    tag = "misc",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Attachment bytes"),
        (status = 404, description = "Unknown id, empty pointer, or missing file"),
    )
)]
pub async fn download_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let service = MiscAssetService::new(state.db.clone());
    let row = fetch_misc_asset(&service, id).await?;
    if row.attachment.is_empty() {
        return Err(AppError::NotFound("Attachment not found".to_string()));
    }
    let content = state.store.open(&row.attachment).await?;
    attachments::download_response(&row.attachment, content)
}

/// Detach and discard the asset's attachment
#[utoipa::path(
    delete,
    path = "/{id}/attachment",
    context_path = "/api/v1/misc",
    tag = "misc",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Attachment cleared"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn delete_attachment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = MiscAssetService::new(state.db.clone());
    let row = fetch_misc_asset(&service, id).await?;

    service.replace_attachment(id, "").await?;
    attachments::discard_stored_file(&state.store, &row.attachment).await;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_misc_assets,
        create_misc_asset,
        get_misc_asset,
        update_misc_asset,
        delete_misc_asset,
        upload_attachment,
        download_attachment,
        delete_attachment,
    ),
    components(schemas(MiscAsset, MiscAssetFields))
)]
pub struct MiscAssetsApiDoc;
