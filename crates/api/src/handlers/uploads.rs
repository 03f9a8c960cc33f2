//! Local storage for uploaded files.

use std::path::Path;

use chrono::Utc;
use labourhub_core::upload::validate_upload;

use crate::error::{AppError, AppResult};

/// Validate and persist an uploaded file under the upload directory.
///
/// Files are named by upload time (`<unix_millis>.<ext>`), matching the paths
/// served back at `/uploads`. Returns the relative path stored on the user
/// record.
pub(crate) async fn store_upload(
    upload_dir: &Path,
    declared_type: &str,
    bytes: &[u8],
) -> AppResult<String> {
    let ext = validate_upload(declared_type, bytes)?;

    let filename = format!("{}.{ext}", Utc::now().timestamp_millis());
    let path = upload_dir.join(&filename);

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    Ok(format!("uploads/{filename}"))
}
