//! RGBA conversion for edit inputs.

use std::path::Path;

use ::image::{DynamicImage, RgbaImage};

use crate::error::{OutpaintError, Result};

use super::ImageFormat;

/// Returns the image with an alpha channel, adding a fully opaque one if needed.
pub fn to_rgba(img: DynamicImage) -> RgbaImage {
    match img {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.to_rgba8(),
    }
}

/// Decodes `input`, guarantees an alpha channel, and writes it as PNG to `output`.
///
/// The output file is overwritten if it already exists. Errors name whichever
/// path failed.
pub async fn convert_to_rgba(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let input = input.as_ref().to_path_buf();
    let output = output.as_ref().to_path_buf();

    tokio::task::spawn_blocking(move || convert_blocking(&input, &output)).await??;
    Ok(())
}

fn convert_blocking(input: &Path, output: &Path) -> Result<()> {
    let img = ::image::open(input).map_err(|source| OutpaintError::Conversion {
        path: input.to_path_buf(),
        source,
    })?;

    to_rgba(img)
        .save_with_format(output, ImageFormat::Png.as_codec())
        .map_err(|source| OutpaintError::Conversion {
            path: output.to_path_buf(),
            source,
        })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        "converted image to RGBA"
    );
    Ok(())
}
