//! Raster source compositing.
//!
//! Crops a raster to its own visible content, scales it into the target's
//! destination rectangle keeping the aspect ratio, and centers it on a
//! transparent canvas.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tiny_skia::{ColorU8, PremultipliedColorU8};

use super::bounds::{ContentBounds, detect_rgba_bounds};
use super::canvas::{DestRect, empty_canvas, fit_keep_aspect};
use super::error::RenderError;
use crate::target::RenderTarget;

/// Resampling filter for raster scaling.
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// A decoded raster source, converted to RGBA.
#[derive(Debug, Clone)]
pub struct RasterSource {
    image: RgbaImage,
}

impl RasterSource {
    /// Decode an image file (PNG, JPEG, WebP).
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let decoded = image::open(path).map_err(|err| match err {
            image::ImageError::IoError(io) => RenderError::Io(path.to_path_buf(), io),
            other => RenderError::InvalidRaster(path.to_path_buf(), other),
        })?;
        Ok(Self {
            image: decoded.to_rgba8(),
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Visible-content bounds of this source.
    pub fn measure_bounds(&self, threshold: u8) -> ContentBounds {
        detect_rgba_bounds(&self.image, threshold)
    }
}

/// Composite `source` into `target`, measuring its bounds first.
pub fn composite_to_bounds(source: &RgbaImage, target: &RenderTarget, threshold: u8) -> RgbaImage {
    let bounds = detect_rgba_bounds(source, threshold);
    composite_with_bounds(source, &bounds, target)
}

/// Composite `source` into `target` using previously measured bounds.
///
/// A zero-sized source produces the empty canvas.
pub fn composite_with_bounds(
    source: &RgbaImage,
    source_bounds: &ContentBounds,
    target: &RenderTarget,
) -> RgbaImage {
    let mut canvas = empty_canvas(target.width, target.height);
    if source.width() == 0 || source.height() == 0 {
        return canvas;
    }

    let dest = DestRect::for_target(target);

    let mut content = if source_bounds.is_croppable() {
        imageops::crop_imm(
            source,
            source_bounds.x,
            source_bounds.y,
            source_bounds.width,
            source_bounds.height,
        )
        .to_image()
    } else {
        source.clone()
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (dest_w, dest_h) = (dest.width as u32, dest.height as u32);
    let (scaled_w, scaled_h) = fit_keep_aspect(content.width(), content.height(), dest_w, dest_h);

    premultiply(&mut content);
    let mut scaled = imageops::resize(&content, scaled_w, scaled_h, RESAMPLE_FILTER);
    demultiply(&mut scaled);

    #[allow(clippy::cast_possible_truncation)]
    let offset_x = (dest.x + (dest.width - scaled_w as f32) / 2.0) as i64;
    #[allow(clippy::cast_possible_truncation)]
    let offset_y = (dest.y + (dest.height - scaled_h as f32) / 2.0) as i64;

    imageops::overlay(&mut canvas, &scaled, offset_x, offset_y);
    canvas
}

/// Scale color channels by alpha, in place.
fn premultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let c = ColorU8::from_rgba(r, g, b, a).premultiply();
        pixel.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
}

/// Back to straight alpha. Filter overshoot above alpha is clamped.
fn demultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = match PremultipliedColorU8::from_rgba(r.min(a), g.min(a), b.min(a), a) {
            Some(c) if a > 0 => {
                let c = c.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            }
            _ => [0, 0, 0, 0],
        };
    }
}
