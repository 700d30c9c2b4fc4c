//! PNG export of a rendered surface.

use std::path::Path;

use backdrop_common::RenderError;
use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::canvas::Surface;

/// Copy the surface into an image, scaling alpha by the canvas `opacity`.
pub fn to_image(surface: &Surface, opacity: f64) -> Result<RgbaImage, RenderError> {
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mut bytes = surface.as_bytes().to_vec();
    for px in bytes.chunks_exact_mut(4) {
        px[3] = (px[3] as f64 * opacity).round() as u8;
    }
    RgbaImage::from_raw(surface.width(), surface.height(), bytes).ok_or_else(|| {
        RenderError::Export(format!(
            "pixel buffer does not match {}x{}",
            surface.width(),
            surface.height()
        ))
    })
}

/// Write the surface as a PNG file.
pub fn export_png(surface: &Surface, opacity: f64, path: &Path) -> Result<(), RenderError> {
    let image = to_image(surface, opacity)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| RenderError::Export(format!("{}: {e}", path.display())))?;
    info!(
        path = %path.display(),
        width = surface.width(),
        height = surface.height(),
        "frame exported"
    );
    Ok(())
}
