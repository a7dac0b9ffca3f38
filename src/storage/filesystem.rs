//! Filesystem attachment store.
//!
//! Files land flat in one upload directory under a sanitized name; the
//! string returned by [`FilesystemStore::save`] is what records persist as
//! their attachment pointer. Lookups go through the base name of the stored
//! pointer, so pointers created under other base directories (or with
//! Windows separators) still resolve.

use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Reduce an uploaded filename to a safe flat name.
///
/// Takes the last path component (either separator style), replaces
/// anything outside `[A-Za-z0-9._-]` with `_` and strips leading dots.
/// Returns `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        None
    } else {
        Some(cleaned)
    }
}

/// Base name of a stored attachment pointer, tolerant of both separators.
pub fn stored_file_name(stored: &str) -> Option<&str> {
    let name = stored.rsplit(['/', '\\']).next().unwrap_or(stored);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Filesystem-backed attachment store
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    base_path: PathBuf,
}

impl FilesystemStore {
    /// Create a new store rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_base_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Write an upload and return the pointer string to persist.
    ///
    /// The raw filename is sanitized first; a name with the same sanitized
    /// form overwrites the previous file, mirroring how the upload folder
    /// has always behaved.
    pub async fn save(&self, raw_filename: &str, content: Bytes) -> Result<String> {
        let name = sanitize_filename(raw_filename)
            .ok_or_else(|| AppError::Validation("Unusable attachment filename".into()))?;

        self.ensure_base_dir().await?;
        let path = self.path_for(&name);

        let mut file = fs::File::create(&path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Read an attachment back by its stored pointer.
    pub async fn open(&self, stored: &str) -> Result<Bytes> {
        let name = stored_file_name(stored)
            .ok_or_else(|| AppError::NotFound("Attachment not found".into()))?;

        match fs::read(self.path_for(name)).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("Attachment not found".into()))
            }
            Err(e) => Err(AppError::Storage(format!("Failed to read {}: {}", name, e))),
        }
    }

    /// Delete the file behind a pointer. A file that is already gone is
    /// fine; pointers are advisory.
    pub async fn remove(&self, stored: &str) -> Result<()> {
        let Some(name) = stored_file_name(stored) else {
            return Ok(());
        };

        match fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete {}: {}",
                name, e
            ))),
        }
    }
}
