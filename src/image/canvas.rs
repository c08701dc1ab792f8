//! Canvas helpers shared by the vector and raster paths.

use image::{Rgba, RgbaImage};
use tiny_skia::Pixmap;

use crate::target::RenderTarget;

/// Destination rectangle inside a target canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DestRect {
    /// The region content is projected into.
    ///
    /// A target's own bounds win unless they cover the whole canvas or
    /// have zero area.
    pub fn for_target(target: &RenderTarget) -> Self {
        match target.bounds {
            Some(b) if !b.is_full() && !b.is_empty() => Self {
                x: b.x as f32,
                y: b.y as f32,
                width: b.width as f32,
                height: b.height as f32,
            },
            _ => Self {
                x: 0.0,
                y: 0.0,
                width: target.width as f32,
                height: target.height as f32,
            },
        }
    }
}

/// Fully transparent `width x height` canvas.
#[inline]
pub fn empty_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

/// Largest size with the source aspect ratio that fits the destination.
///
/// Integer arithmetic: the long side fits exactly, the short side rounds
/// down. Never returns a zero dimension.
pub fn fit_keep_aspect(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (dst_w.max(1), dst_h.max(1));
    }

    let (src_w, src_h) = (u64::from(src_w), u64::from(src_h));
    let (dst_w64, dst_h64) = (u64::from(dst_w), u64::from(dst_h));

    let width_for_full_height = dst_h64 * src_w / src_h;
    #[allow(clippy::cast_possible_truncation)] // bounded by dst_w / dst_h
    let (w, h) = if width_for_full_height <= dst_w64 {
        (width_for_full_height as u32, dst_h)
    } else {
        (dst_w, (dst_w64 * src_h / src_w) as u32)
    };

    (w.max(1), h.max(1))
}

/// Convert a premultiplied tiny-skia pixmap into a straight-alpha image.
pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, raw).unwrap_or_else(|| empty_canvas(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ContentBounds;

    #[test]
    fn test_fit_square_into_square() {
        assert_eq!(fit_keep_aspect(40, 40, 192, 192), (192, 192));
    }

    #[test]
    fn test_fit_wide_source() {
        assert_eq!(fit_keep_aspect(40, 20, 100, 100), (100, 50));
    }

    #[test]
    fn test_fit_tall_source() {
        assert_eq!(fit_keep_aspect(10, 30, 90, 90), (30, 90));
    }

    #[test]
    fn test_fit_never_exceeds_destination() {
        for (sw, sh) in [(7, 3), (3, 7), (1, 1000), (1000, 1), (33, 34)] {
            for (dw, dh) in [(48, 48), (108, 40), (40, 108), (1, 1)] {
                let (w, h) = fit_keep_aspect(sw, sh, dw, dh);
                assert!(w <= dw.max(1) && h <= dh.max(1), "{sw}x{sh} -> {dw}x{dh} gave {w}x{h}");
                assert!(w == dw || h == dh);
            }
        }
    }

    #[test]
    fn test_dest_rect_full_canvas_without_bounds() {
        let target = RenderTarget::square("icon", "icon.png", 48);
        let rect = DestRect::for_target(&target);
        assert_eq!(rect, DestRect { x: 0.0, y: 0.0, width: 48.0, height: 48.0 });
    }

    #[test]
    fn test_dest_rect_uses_partial_bounds() {
        let bounds = ContentBounds {
            x: 34,
            y: 34,
            width: 40,
            height: 40,
            source_width: 108,
            source_height: 108,
        };
        let target = RenderTarget::square("fg", "fg.png", 108).with_bounds(bounds);
        let rect = DestRect::for_target(&target);
        assert_eq!(rect, DestRect { x: 34.0, y: 34.0, width: 40.0, height: 40.0 });
    }

    #[test]
    fn test_dest_rect_ignores_full_bounds() {
        let target =
            RenderTarget::square("icon", "icon.png", 64).with_bounds(ContentBounds::full(64, 64));
        assert_eq!(DestRect::for_target(&target).width, 64.0);
    }

    #[test]
    fn test_dest_rect_zero_area_bounds_fill_canvas() {
        for (width, height) in [(0, 0), (20, 0), (0, 20)] {
            let bounds = ContentBounds {
                x: 10,
                y: 10,
                width,
                height,
                source_width: 48,
                source_height: 48,
            };
            let target = RenderTarget::square("icon", "icon.png", 48).with_bounds(bounds);
            assert_eq!(
                DestRect::for_target(&target),
                DestRect { x: 0.0, y: 0.0, width: 48.0, height: 48.0 }
            );
        }
    }

    #[test]
    fn test_pixmap_to_image_demultiplies() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(200, 100, 0, 128));
        let img = pixmap_to_image(&pixmap);
        let px = img.get_pixel(0, 0);
        assert_eq!(px[3], 128);
        // demultiplied color is close to the original
        assert!(px[0].abs_diff(200) <= 2);
        assert!(px[1].abs_diff(100) <= 2);
    }
}
