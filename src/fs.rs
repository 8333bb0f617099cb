//! Folder helpers.

use std::path::Path;

use crate::error::Result;

/// Creates the directory at `path` if it does not exist yet.
///
/// Only the named directory is created; its parent must already exist.
/// Returns `true` when the directory was created by this call.
pub async fn ensure_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
    {
        return Ok(false);
    }

    tokio::fs::create_dir(path).await?;
    tracing::info!(path = %path.display(), "created folder");
    Ok(true)
}
