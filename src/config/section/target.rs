//! `[[target]]` array configuration.
//!
//! Explicit output files, for anything the Android tables do not cover
//! (iOS app icons, store artwork, web manifests).
//!
//! # Example
//!
//! ```toml
//! [[target]]
//! name = "AppStore"
//! path = "ios/AppIcon.appiconset/icon-1024.png"
//! size = 1024
//! category = "ios"
//! source = "assets/appstore.svg"
//!
//! [[target]]
//! path = "android/play_store_feature.png"
//! width = 1024
//! height = 500
//! bounds = { x = 262, y = 0, width = 500, height = 500 }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::util::resolve_config_path;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::ContentBounds;
use crate::target::TargetCategory;

/// Destination rectangle as written in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundsConfig {
    /// Bounds framed against a `width x height` canvas.
    pub const fn within(&self, width: u32, height: u32) -> ContentBounds {
        ContentBounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            source_width: width,
            source_height: height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Display name (default: file name).
    pub name: Option<String>,

    /// Output PNG path.
    pub path: PathBuf,

    /// Square size shorthand.
    pub size: Option<u32>,

    pub width: Option<u32>,

    pub height: Option<u32>,

    /// Destination framing inside the canvas.
    pub bounds: Option<BoundsConfig>,

    /// Derive destination framing from the existing file's visible content.
    pub detect_bounds: bool,

    /// Override source for this target.
    pub source: Option<PathBuf>,

    pub category: TargetCategory,

    pub enabled: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            name: None,
            path: PathBuf::new(),
            size: None,
            width: None,
            height: None,
            bounds: None,
            detect_bounds: false,
            source: None,
            category: TargetCategory::Custom,
            enabled: true,
        }
    }
}

impl TargetConfig {
    pub const PATH: FieldPath = FieldPath::new("target.path");
    pub const SIZE: FieldPath = FieldPath::new("target.size");
    pub const BOUNDS: FieldPath = FieldPath::new("target.bounds");
    pub const SOURCE: FieldPath = FieldPath::new("target.source");

    /// Pixel size, `width`/`height` taking precedence over `size`.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let width = self.width.or(self.size)?;
        let height = self.height.or(self.size)?;
        Some((width, height))
    }

    /// Name shown in listings: explicit name or file name.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    pub fn normalize(&mut self, root: &Path) {
        self.path = resolve_config_path(&self.path, root);
        if let Some(source) = self.source.take() {
            self.source = Some(resolve_config_path(&source, root));
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let label = self.path.display();

        if self.path.as_os_str().is_empty() {
            diag.error(Self::PATH, "every [[target]] needs a `path`");
            return;
        }

        let Some((width, height)) = self.dimensions() else {
            diag.error_with_hint(
                Self::SIZE,
                format!("`{label}` has no size"),
                "set `size`, or both `width` and `height`",
            );
            return;
        };

        if width == 0 || height == 0 {
            diag.error(Self::SIZE, format!("`{label}` must have a positive size"));
            return;
        }

        if let Some(bounds) = self.bounds {
            let fits = u64::from(bounds.x) + u64::from(bounds.width) <= u64::from(width)
                && u64::from(bounds.y) + u64::from(bounds.height) <= u64::from(height);
            if !fits {
                diag.error(
                    Self::BOUNDS,
                    format!("bounds of `{label}` exceed its {width}x{height} canvas"),
                );
            } else if bounds.width == 0 || bounds.height == 0 {
                diag.error(Self::BOUNDS, format!("bounds of `{label}` have zero area"));
            }
            if self.detect_bounds {
                diag.warn(
                    Self::BOUNDS,
                    format!("`{label}` sets both `bounds` and `detect_bounds`, using `bounds`"),
                );
            }
        }

        if let Some(source) = &self.source
            && !source.is_file()
        {
            diag.error(
                Self::SOURCE,
                format!("source `{}` does not exist", source.display()),
            );
        }
    }

    /// Report targets that share an output path.
    pub fn validate_unique(targets: &[Self], diag: &mut ConfigDiagnostics) {
        let mut seen = HashSet::new();
        for target in targets {
            if !seen.insert(&target.path) {
                diag.error(
                    Self::PATH,
                    format!("`{}` is declared more than once", target.path.display()),
                );
            }
        }
    }
}
