//! Outpainting canvas preparation.
//!
//! The edit endpoint regenerates transparent pixels, so placing a picture in
//! the middle of a larger transparent canvas and using that canvas as both
//! source and mask asks the service to paint everything around it.

use std::path::{Path, PathBuf};

use ::image::{imageops, DynamicImage, Rgba, RgbaImage};

use crate::config::Config;
use crate::error::{OutpaintError, Result};
use crate::fs::ensure_dir;
use crate::image::{to_rgba, Dimensions, ImageFormat};

/// Reference copy written next to the source and mask images.
pub const SAMPLE_IMAGE: &str = "sample.png";

/// Default canvas size for outpainting inputs.
pub const DEFAULT_CANVAS: Dimensions = Dimensions::new(2042, 1021);

/// Returns a fully transparent canvas with `img` alpha-blended at its centre.
///
/// Images larger than the canvas are cropped symmetrically.
pub fn centered_canvas(img: &DynamicImage, canvas: Dimensions) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, Rgba([255, 255, 255, 0]));
    let x = (i64::from(canvas.width) - i64::from(img.width())) / 2;
    let y = (i64::from(canvas.height) - i64::from(img.height())) / 2;
    imageops::overlay(&mut out, &to_rgba(img.clone()), x, y);
    out
}

/// Builds the canvas from `input` and writes it as the configured source and
/// mask images plus a [`SAMPLE_IMAGE`] copy, creating the source folder if
/// needed.
///
/// Returns the written paths.
pub async fn write_outpaint_inputs(
    input: impl AsRef<Path>,
    canvas: Dimensions,
    config: &Config,
) -> Result<Vec<PathBuf>> {
    ensure_dir(&config.source_dir).await?;

    let input = input.as_ref().to_path_buf();
    let targets = vec![
        config.source_path(),
        config.mask_path(),
        config.source_dir.join(SAMPLE_IMAGE),
    ];
    let written = targets.clone();

    tokio::task::spawn_blocking(move || {
        let img = ::image::open(&input).map_err(|source| OutpaintError::Decode {
            path: input.clone(),
            source,
        })?;
        let out = centered_canvas(&img, canvas);
        for path in &targets {
            let format = ImageFormat::from_path(path).unwrap_or_default();
            out.save_with_format(path, format.as_codec())
                .map_err(|source| OutpaintError::Conversion {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(path = %path.display(), size = %canvas, "wrote canvas");
        }
        Ok::<_, OutpaintError>(())
    })
    .await??;

    Ok(written)
}
