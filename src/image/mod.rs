//! Content-bounds-aware rendering pipeline.
//!
//! # Modules
//!
//! - [`bounds`]: visible-content bounding box detection
//! - [`vector`]: SVG measurement and cropped rasterization (resvg)
//! - [`raster`]: raster crop, aspect-preserving scale, centering (image)
//! - [`canvas`]: destination rectangles and pixel buffer helpers
//!
//! # Architecture
//!
//! ```text
//!   SVG source                  raster source
//!       │                            │
//!       ▼                            ▼
//!  ┌─────────┐                  ┌─────────┐
//!  │ measure │ (512², cached)   │ bounds  │ (cached)
//!  └────┬────┘                  └────┬────┘
//!       ▼                            ▼
//!  ┌────────────────────┐   ┌──────────────────────┐
//!  │ rasterize_to_bounds│   │ composite_with_bounds│
//!  └─────────┬──────────┘   └──────────┬───────────┘
//!            └──────────┬──────────────┘
//!                       ▼
//!        target-sized RGBA canvas ──► PNG
//! ```

pub mod bounds;
pub mod canvas;
mod error;
pub mod raster;
pub mod vector;

use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

pub use bounds::{ContentBounds, DEFAULT_ALPHA_THRESHOLD, detect_bounds, detect_rgba_bounds};
pub use canvas::empty_canvas;
pub use error::RenderError;
pub use raster::{RasterSource, composite_to_bounds, composite_with_bounds};
pub use vector::{DEFAULT_MEASURE_SIZE, VectorSource, rasterize_to_bounds};

/// Encode `image` as PNG at `path`, creating parent directories.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| RenderError::Io(parent.to_path_buf(), err))?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| RenderError::Encode(path.to_path_buf(), err))
}

/// Whether `path` names a vector document, by extension.
pub fn is_vector_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg") || ext.eq_ignore_ascii_case("svgz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_is_vector_path() {
        assert!(is_vector_path(Path::new("icon.svg")));
        assert!(is_vector_path(Path::new("ICON.SVG")));
        assert!(is_vector_path(Path::new("a/b/icon.svgz")));
        assert!(!is_vector_path(Path::new("icon.png")));
        assert!(!is_vector_path(Path::new("svg")));
    }

    #[test]
    fn test_write_png_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("res/mipmap-mdpi/ic_launcher.png");
        let img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));

        write_png(&img, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), img.as_raw());
    }
}
