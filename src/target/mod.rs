//! Render targets: one destination icon file each.
//!
//! | Module     | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `density`  | Static Android density tables and safe zones    |
//! | `resolve`  | Build the target list from `iconsmith.toml`     |

pub mod density;
mod resolve;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::image::{ContentBounds, is_vector_path};

pub use resolve::resolve_targets;

/// Where a target's pixels come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceRef {
    /// The configured default source.
    #[default]
    Default,
    /// Vector override (SVG).
    Vector(PathBuf),
    /// Raster override (PNG, JPEG, WebP).
    Raster(PathBuf),
}

impl SourceRef {
    /// Classify an override path by extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if is_vector_path(&path) {
            Self::Vector(path)
        } else {
            Self::Raster(path)
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Default => None,
            Self::Vector(path) | Self::Raster(path) => Some(path),
        }
    }

    pub const fn is_override(&self) -> bool {
        !matches!(self, Self::Default)
    }
}

/// Informational grouping used for listing and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetCategory {
    /// Legacy Android launcher icon (48dp base).
    Android,
    /// Android adaptive icon layer (108dp base).
    Adaptive,
    /// Android notification icon.
    Notification,
    /// iOS app icon.
    Ios,
    /// Anything else declared in `[[target]]`.
    #[default]
    Custom,
}

impl TargetCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Adaptive => "adaptive",
            Self::Notification => "notification",
            Self::Ios => "ios",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One destination icon file to produce.
///
/// `bounds` frames the destination (e.g. an adaptive icon safe zone). It is
/// unrelated to the bounds measured on whichever source feeds the target.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bounds: Option<ContentBounds>,
    pub source: SourceRef,
    pub category: TargetCategory,
    pub enabled: bool,
}

impl RenderTarget {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            width,
            height,
            bounds: None,
            source: SourceRef::Default,
            category: TargetCategory::Custom,
            enabled: true,
        }
    }

    pub fn square(name: impl Into<String>, path: impl Into<PathBuf>, size: u32) -> Self {
        Self::new(name, path, size, size)
    }

    pub fn with_bounds(mut self, bounds: ContentBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = source;
        self
    }

    pub fn with_category(mut self, category: TargetCategory) -> Self {
        self.category = category;
        self
    }

    /// Check the target invariants: positive size, bounds inside the canvas.
    pub fn check(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("size must be positive, got {}x{}", self.width, self.height));
        }
        if let Some(b) = self.bounds {
            let fits = u64::from(b.x) + u64::from(b.width) <= u64::from(self.width)
                && u64::from(b.y) + u64::from(b.height) <= u64::from(self.height);
            if !fits {
                return Err(format!(
                    "bounds {}x{}+{}+{} exceed the {}x{} canvas",
                    b.width, b.height, b.x, b.y, self.width, self.height
                ));
            }
        }
        Ok(())
    }

    /// `48×48` style size label.
    pub fn size_label(&self) -> String {
        format!("{}×{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_ref_from_path() {
        assert_eq!(
            SourceRef::from_path("art/icon.svg"),
            SourceRef::Vector(PathBuf::from("art/icon.svg"))
        );
        assert_eq!(
            SourceRef::from_path("art/icon.png"),
            SourceRef::Raster(PathBuf::from("art/icon.png"))
        );
        assert!(!SourceRef::Default.is_override());
        assert_eq!(SourceRef::Default.path(), None);
    }

    #[test]
    fn test_check_rejects_zero_size() {
        let target = RenderTarget::new("icon", "icon.png", 0, 48);
        assert!(target.check().is_err());
    }

    #[test]
    fn test_check_bounds_inside_canvas() {
        let inside = ContentBounds {
            x: 34,
            y: 34,
            width: 40,
            height: 40,
            source_width: 108,
            source_height: 108,
        };
        assert!(RenderTarget::square("fg", "fg.png", 108).with_bounds(inside).check().is_ok());

        let outside = ContentBounds { x: 80, ..inside };
        let err = RenderTarget::square("fg", "fg.png", 108)
            .with_bounds(outside)
            .check()
            .unwrap_err();
        assert!(err.contains("exceed"));
    }

    #[test]
    fn test_builder_defaults() {
        let target = RenderTarget::square("ic_launcher", "res/ic_launcher.png", 192);
        assert!(target.enabled);
        assert_eq!(target.category, TargetCategory::Custom);
        assert_eq!(target.source, SourceRef::Default);
        assert_eq!(target.size_label(), "192×192");
    }
}
