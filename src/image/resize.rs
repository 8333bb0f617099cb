//! In-place resizing of downloaded results.

use std::path::Path;

use ::image::imageops::FilterType;
use ::image::DynamicImage;

use crate::error::{OutpaintError, Result};

use super::{Dimensions, ImageFormat};

/// Scales to exactly `target`, ignoring the source aspect ratio.
pub fn resize_exact(img: &DynamicImage, target: Dimensions) -> DynamicImage {
    img.resize_exact(target.width, target.height, FilterType::Lanczos3)
}

/// Resizes the image at `path` to `target` and overwrites the file.
///
/// The encoding follows the file extension, falling back to PNG.
pub async fn resize_in_place(path: impl AsRef<Path>, target: Dimensions) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || resize_blocking(&path, target)).await??;
    Ok(())
}

fn resize_blocking(path: &Path, target: Dimensions) -> Result<()> {
    let resize_error = |source| OutpaintError::Resize {
        path: path.to_path_buf(),
        source,
    };

    let img = ::image::open(path).map_err(resize_error)?;
    let format = ImageFormat::from_path(path).unwrap_or_default();
    resize_exact(&img, target)
        .save_with_format(path, format.as_codec())
        .map_err(resize_error)?;

    tracing::info!(path = %path.display(), size = %target, "resized image");
    Ok(())
}
