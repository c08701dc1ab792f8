//! Visible-content bounding box detection.
//!
//! A pixel counts as visible when its alpha is strictly above the
//! threshold, so faint anti-aliasing fringes do not grow the box.

use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Default alpha visibility threshold (0..=255 scale).
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 10;

/// Sub-rectangle of an image that holds visible pixels.
///
/// `source_width`/`source_height` record the full image extent the box
/// was measured against, so vector bounds can be mapped back into the
/// document's own coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub source_width: u32,
    #[serde(default)]
    pub source_height: u32,
}

impl ContentBounds {
    /// Bounds covering the whole `width x height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            source_width: width,
            source_height: height,
        }
    }

    /// Box with zero area, used for zero-sized images.
    pub const fn empty() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            source_width: 0,
            source_height: 0,
        }
    }

    /// Bounds cover the entire image, nothing to crop.
    pub const fn is_full(&self) -> bool {
        self.x == 0
            && self.y == 0
            && self.width == self.source_width
            && self.height == self.source_height
    }

    /// Zero area.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bounds both hold content and leave something to crop.
    #[inline]
    pub const fn is_croppable(&self) -> bool {
        !self.is_full() && !self.is_empty()
    }

    /// Check that the box lies within its source extent.
    pub const fn fits_source(&self) -> bool {
        self.x as u64 + self.width as u64 <= self.source_width as u64
            && self.y as u64 + self.height as u64 <= self.source_height as u64
    }
}

/// Detect visible-content bounds using [`DEFAULT_ALPHA_THRESHOLD`].
pub fn detect_bounds_default(image: &DynamicImage) -> ContentBounds {
    detect_bounds(image, DEFAULT_ALPHA_THRESHOLD)
}

/// Detect the bounding box of pixels with alpha above `threshold`.
///
/// Non-RGBA images are converted first. A fully transparent image yields
/// full bounds rather than a degenerate box.
pub fn detect_bounds(image: &DynamicImage, threshold: u8) -> ContentBounds {
    match image {
        DynamicImage::ImageRgba8(rgba) => detect_rgba_bounds(rgba, threshold),
        other => detect_rgba_bounds(&other.to_rgba8(), threshold),
    }
}

/// [`detect_bounds`] over an already converted RGBA buffer.
pub fn detect_rgba_bounds(image: &RgbaImage, threshold: u8) -> ContentBounds {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return ContentBounds::empty();
    }

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > threshold {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !found {
        return ContentBounds::full(width, height);
    }

    ContentBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
        source_width: width,
        source_height: height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_square(
        width: u32,
        height: u32,
        cols: std::ops::Range<u32>,
        rows: std::ops::Range<u32>,
    ) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for y in rows {
            for x in cols.clone() {
                img.put_pixel(x, y, Rgba([200, 40, 40, 255]));
            }
        }
        img
    }

    #[test]
    fn test_transparent_image_is_full() {
        let img = RgbaImage::new(64, 32);
        let bounds = detect_rgba_bounds(&img, DEFAULT_ALPHA_THRESHOLD);
        assert!(bounds.is_full());
        assert_eq!(bounds, ContentBounds::full(64, 32));
    }

    #[test]
    fn test_single_pixel() {
        let mut img = RgbaImage::new(100, 100);
        img.put_pixel(37, 81, Rgba([0, 0, 0, 255]));

        let bounds = detect_rgba_bounds(&img, DEFAULT_ALPHA_THRESHOLD);
        assert_eq!((bounds.x, bounds.y), (37, 81));
        assert_eq!((bounds.width, bounds.height), (1, 1));
        assert!(!bounds.is_full());
        assert!(!bounds.is_empty());
    }

    #[test]
    fn test_solid_square() {
        // rows [10,50), cols [20,60)
        let img = solid_square(100, 100, 20..60, 10..50);
        let bounds = detect_rgba_bounds(&img, DEFAULT_ALPHA_THRESHOLD);

        assert_eq!(bounds.x, 20);
        assert_eq!(bounds.y, 10);
        assert_eq!(bounds.width, 40);
        assert_eq!(bounds.height, 40);
        assert_eq!((bounds.source_width, bounds.source_height), (100, 100));
        assert!(bounds.fits_source());
    }

    #[test]
    fn test_faint_pixels_ignored() {
        let mut img = solid_square(50, 50, 10..20, 10..20);
        // fringe at exactly the threshold stays invisible
        img.put_pixel(0, 0, Rgba([0, 0, 0, DEFAULT_ALPHA_THRESHOLD]));
        img.put_pixel(49, 49, Rgba([0, 0, 0, 3]));

        let bounds = detect_rgba_bounds(&img, DEFAULT_ALPHA_THRESHOLD);
        assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (10, 10, 10, 10));
    }

    #[test]
    fn test_custom_threshold() {
        let mut img = RgbaImage::new(20, 20);
        img.put_pixel(2, 2, Rgba([0, 0, 0, 40]));
        img.put_pixel(10, 10, Rgba([0, 0, 0, 255]));

        let loose = detect_rgba_bounds(&img, 10);
        assert_eq!((loose.x, loose.y), (2, 2));

        let strict = detect_rgba_bounds(&img, 100);
        assert_eq!((strict.x, strict.y, strict.width, strict.height), (10, 10, 1, 1));
    }

    #[test]
    fn test_full_bleed_content_is_full() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 255]));
        assert!(detect_rgba_bounds(&img, DEFAULT_ALPHA_THRESHOLD).is_full());
    }

    #[test]
    fn test_non_rgba_input_converted() {
        let gray = image::GrayImage::from_pixel(8, 8, image::Luma([0]));
        // no alpha channel: every pixel is opaque
        let bounds = detect_bounds_default(&DynamicImage::ImageLuma8(gray));
        assert!(bounds.is_full());
    }

    #[test]
    fn test_zero_sized_image_is_empty() {
        let img = RgbaImage::new(0, 0);
        let bounds = detect_rgba_bounds(&img, DEFAULT_ALPHA_THRESHOLD);
        assert!(bounds.is_empty());
    }
}
