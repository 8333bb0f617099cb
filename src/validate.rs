//! Pre-flight checks run before every outpainting pass.

use crate::config::{Config, API_KEY_ENV};
use crate::error::{OutpaintError, Result};
use crate::fs::ensure_dir;
use crate::image::{read_dimensions, Dimensions};

/// Validates the environment for a run, stopping at the first failure.
///
/// In order: the API key is set, both input files exist, both inputs share
/// the same resolution, then the RGBA and destination folders are created if
/// missing. Returns the shared input resolution.
pub async fn validate_environment(config: &Config) -> Result<Dimensions> {
    if !config.has_api_key() {
        return Err(OutpaintError::Config(format!("{API_KEY_ENV} is not set")));
    }

    let source = config.source_path();
    let mask = config.mask_path();
    for path in [&source, &mask] {
        if !tokio::fs::try_exists(path).await? {
            return Err(OutpaintError::MissingInput { path: path.clone() });
        }
    }

    let (source_dims, mask_dims) = tokio::task::spawn_blocking(move || {
        Ok::<_, OutpaintError>((read_dimensions(&source)?, read_dimensions(&mask)?))
    })
    .await??;
    if source_dims != mask_dims {
        return Err(OutpaintError::ResolutionMismatch {
            image: source_dims,
            mask: mask_dims,
        });
    }

    ensure_dir(&config.rgba_dir).await?;
    ensure_dir(&config.dest_dir).await?;

    tracing::debug!(resolution = %source_dims, "environment validated");
    Ok(source_dims)
}
