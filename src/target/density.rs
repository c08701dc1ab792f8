//! Android density tables.
//!
//! Legacy launcher and notification icons use a 48dp base, adaptive icon
//! layers a 108dp base of which the centered 72dp is the safe zone.

use crate::image::ContentBounds;

/// One `mipmap-*` density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    /// Resource directory name, e.g. `mipmap-xhdpi`.
    pub dir: &'static str,
    /// Legacy launcher icon size in pixels (48dp).
    pub legacy: u32,
    /// Adaptive icon layer size in pixels (108dp).
    pub adaptive: u32,
}

/// All densities, lowest first.
pub static DENSITIES: [Density; 5] = [
    Density { dir: "mipmap-mdpi", legacy: 48, adaptive: 108 },
    Density { dir: "mipmap-hdpi", legacy: 72, adaptive: 162 },
    Density { dir: "mipmap-xhdpi", legacy: 96, adaptive: 216 },
    Density { dir: "mipmap-xxhdpi", legacy: 144, adaptive: 324 },
    Density { dir: "mipmap-xxxhdpi", legacy: 192, adaptive: 432 },
];

/// Adaptive layer edge that may be clipped by the launcher mask, in dp.
const ADAPTIVE_INSET_DP: u32 = 18;
const ADAPTIVE_BASE_DP: u32 = 108;

/// Kind of Android icon file, which decides its size table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndroidLayer {
    /// `ic_launcher`, `ic_launcher_round`.
    Legacy,
    /// `ic_launcher_foreground`, content kept inside the safe zone.
    Foreground,
    /// `ic_launcher_background`, always full bleed.
    Background,
    /// `ic_notification`.
    Notification,
}

impl AndroidLayer {
    /// Classify an adaptive layer by file stem.
    pub fn adaptive(stem: &str) -> Self {
        if stem.contains("background") {
            Self::Background
        } else {
            Self::Foreground
        }
    }

    /// Pixel size of this layer at `density`.
    pub const fn size_at(&self, density: &Density) -> u32 {
        match self {
            Self::Legacy | Self::Notification => density.legacy,
            Self::Foreground | Self::Background => density.adaptive,
        }
    }
}

/// Look up a density by directory name.
pub fn density(dir: &str) -> Option<&'static Density> {
    DENSITIES.iter().find(|d| d.dir == dir)
}

/// Centered 72/108 safe zone of a `size x size` adaptive layer.
pub const fn safe_zone(size: u32) -> ContentBounds {
    let inset = size * ADAPTIVE_INSET_DP / ADAPTIVE_BASE_DP;
    ContentBounds {
        x: inset,
        y: inset,
        width: size - 2 * inset,
        height: size - 2 * inset,
        source_width: size,
        source_height: size,
    }
}
