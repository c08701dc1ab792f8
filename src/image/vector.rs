//! Vector source rasterization.
//!
//! SVG documents have no pixel grid, so content bounds are measured
//! empirically: the document is rendered once, stretched into a square of
//! `measure_size` pixels, and scanned with [`detect_rgba_bounds`]. The
//! pixel box is then mapped back into document units and used to build a
//! transform that crops the padding during the real render.
//!
//! ```text
//! document ──► measure (512²) ──► ContentBounds (cached per source)
//!     │                                  │
//!     └──────────► rasterize_to_bounds ◄─┘ ──► target-sized RGBA
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tiny_skia::{Pixmap, Transform};

use super::bounds::{ContentBounds, detect_rgba_bounds};
use super::canvas::{DestRect, empty_canvas, pixmap_to_image};
use super::error::RenderError;
use crate::target::RenderTarget;

/// Default square size used to measure vector content bounds.
pub const DEFAULT_MEASURE_SIZE: u32 = 512;

/// A parsed SVG document.
pub struct VectorSource {
    tree: usvg::Tree,
    path: PathBuf,
}

impl std::fmt::Debug for VectorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.size();
        f.debug_struct("VectorSource")
            .field("path", &self.path)
            .field("width", &width)
            .field("height", &height)
            .finish()
    }
}

impl VectorSource {
    /// Read and parse an SVG file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let data = fs::read(path).map_err(|err| RenderError::Io(path.to_path_buf(), err))?;
        Self::parse(&data, path.to_path_buf())
    }

    /// Parse an in-memory SVG document.
    pub fn from_data(data: &[u8]) -> Result<Self, RenderError> {
        Self::parse(data, PathBuf::from("<memory>"))
    }

    fn parse(data: &[u8], path: PathBuf) -> Result<Self, RenderError> {
        match usvg::Tree::from_data(data, &usvg::Options::default()) {
            Ok(tree) => Ok(Self { tree, path }),
            Err(err) => Err(RenderError::InvalidVector(path, err)),
        }
    }

    /// Natural document size in user units.
    pub fn size(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }

    /// Render the whole document stretched onto a `width x height` canvas.
    ///
    /// Aspect ratio is ignored on purpose: this is the measurement render,
    /// and [`rasterize_to_bounds`] maps each axis back independently.
    pub fn render_stretched(&self, width: u32, height: u32) -> Result<RgbaImage, RenderError> {
        let (native_w, native_h) = self.size();
        let transform = Transform::from_scale(width as f32 / native_w, height as f32 / native_h);
        self.render_with(width, height, transform)
    }

    /// Measure visible-content bounds at `measure_size x measure_size`.
    pub fn measure_bounds(&self, measure_size: u32, threshold: u8) -> ContentBounds {
        match self.render_stretched(measure_size, measure_size) {
            Ok(image) => detect_rgba_bounds(&image, threshold),
            Err(_) => ContentBounds::empty(),
        }
    }

    fn render_with(
        &self,
        width: u32,
        height: u32,
        transform: Transform,
    ) -> Result<RgbaImage, RenderError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas(width, height))?;
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
        Ok(pixmap_to_image(&pixmap))
    }
}

/// Render `source` into `target`, cropping the padding described by
/// `source_bounds`.
///
/// `source_bounds` must come from [`VectorSource::measure_bounds`] on the
/// same document; the rasterizer never re-measures.
pub fn rasterize_to_bounds(
    source: &VectorSource,
    target: &RenderTarget,
    source_bounds: &ContentBounds,
) -> RgbaImage {
    let dest = DestRect::for_target(target);
    let transform = if source_bounds.is_croppable() {
        crop_transform(source.size(), source_bounds, dest)
    } else {
        fit_transform(source.size(), dest)
    };

    source
        .render_with(target.width, target.height, transform)
        .unwrap_or_else(|_| empty_canvas(target.width, target.height))
}

/// Fit the whole document into `dest`, uniformly scaled and centered.
fn fit_transform((native_w, native_h): (f32, f32), dest: DestRect) -> Transform {
    let scale = (dest.width / native_w).min(dest.height / native_h);
    let offset_x = dest.x + (dest.width - native_w * scale) / 2.0;
    let offset_y = dest.y + (dest.height - native_h * scale) / 2.0;
    Transform::from_translate(offset_x, offset_y).pre_scale(scale, scale)
}

/// Map only the measured content region onto `dest`.
fn crop_transform(
    (native_w, native_h): (f32, f32),
    bounds: &ContentBounds,
    dest: DestRect,
) -> Transform {
    // measurement pixels -> document units, per axis
    let scale_x = native_w / bounds.source_width as f32;
    let scale_y = native_h / bounds.source_height as f32;

    let content_x = bounds.x as f32 * scale_x;
    let content_y = bounds.y as f32 * scale_y;
    let content_w = bounds.width as f32 * scale_x;
    let content_h = bounds.height as f32 * scale_y;

    let scale = (dest.width / content_w).min(dest.height / content_h);
    let offset_x = dest.x + (dest.width - content_w * scale) / 2.0;
    let offset_y = dest.y + (dest.height - content_h * scale) / 2.0;

    Transform::from_translate(offset_x, offset_y)
        .pre_scale(scale, scale)
        .pre_translate(-content_x, -content_y)
}
