//! Shared helpers for the per-collection attachment endpoints.
//!
//! Every collection exposes the same three operations on its attachment
//! slot: upload (replace), download, and delete. The pointer column is the
//! source of truth; the file on disk is advisory and cleanup failures only
//! warn. Replacement order is fixed: store the new file, commit the new
//! pointer, then discard the old file.

use axum::{
    extract::Multipart,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::error::{AppError, Result};
use crate::storage::filesystem::stored_file_name;
use crate::storage::FilesystemStore;

/// Pull the first file field out of a multipart upload.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<(Bytes, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
    {
        // Accept any field that has a filename (i.e. a file upload)
        let filename = field.file_name().map(|s| s.to_string());
        if let Some(filename) = filename {
            let data: Bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            return Ok((data, filename));
        }
    }
    Err(AppError::Validation(
        "No file field found in multipart form".to_string(),
    ))
}

/// Clear the file behind the previous pointer after the new pointer has
/// been committed. Runs last so a failed pointer update never orphans the
/// record; skipped when the replacement reused the same stored name.
pub(crate) async fn discard_replaced_file(store: &FilesystemStore, previous: &str, current: &str) {
    if previous.is_empty() || previous == current {
        return;
    }
    if let Err(e) = store.remove(previous).await {
        tracing::warn!(pointer = previous, error = %e, "failed to remove replaced attachment file");
    }
}

/// Clear the file behind a pointer after the pointer itself was reset.
pub(crate) async fn discard_stored_file(store: &FilesystemStore, pointer: &str) {
    if pointer.is_empty() {
        return;
    }
    if let Err(e) = store.remove(pointer).await {
        tracing::warn!(pointer, error = %e, "failed to remove detached attachment file");
    }
}

/// Build a download response for a stored attachment: guessed content type
/// plus a filename-preserving Content-Disposition.
pub(crate) fn download_response(pointer: &str, content: Bytes) -> Result<Response> {
    let filename = stored_file_name(pointer)
        .ok_or_else(|| AppError::NotFound("Attachment not found".to_string()))?;

    let content_type = mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        content,
    )
        .into_response())
}
