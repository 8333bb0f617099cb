//! Streaming download of generated images.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::{DownloadFailure, OutpaintError, Result};

/// Fetches `url` and streams the body into `dest`, replacing any existing file.
///
/// Resolves only once every byte has been written and synced to disk. Returns
/// the number of bytes written. Every failure, from the request to the final
/// sync, is reported as [`OutpaintError::Download`]. A failed transfer may
/// leave a truncated file behind.
pub async fn download_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> Result<u64> {
    let dest = dest.as_ref();
    let failed = |source| OutpaintError::Download {
        url: url.to_string(),
        source,
    };

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| failed(DownloadFailure::Transfer(e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(failed(DownloadFailure::Status(status)));
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| failed(DownloadFailure::Write(e)))?;
    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| failed(DownloadFailure::Transfer(e)))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| failed(DownloadFailure::Write(e)))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| failed(DownloadFailure::Write(e)))?;
    file.sync_all()
        .await
        .map_err(|e| failed(DownloadFailure::Write(e)))?;

    tracing::info!(bytes = written, path = %dest.display(), "downloaded image");
    Ok(written)
}
