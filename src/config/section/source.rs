//! `[source]` section configuration.
//!
//! Source assignment for targets: one default vector, per-target
//! overrides, and targets to leave untouched.
//!
//! # Example
//!
//! ```toml
//! [source]
//! default = "assets/icon.svg"
//! disabled = ["ios/AppIcon.appiconset/icon-20.png"]
//!
//! [source.overrides]
//! "android/app/src/main/res/mipmap-mdpi/ic_launcher.png" = "assets/icon-small.png"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::util::resolve_config_path;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source used by every target without an override.
    pub default: Option<PathBuf>,

    /// Target paths that are never regenerated.
    pub disabled: Vec<PathBuf>,

    /// Target path -> override source (SVG or raster).
    pub overrides: BTreeMap<PathBuf, PathBuf>,
}

impl SourceConfig {
    pub const DEFAULT: FieldPath = FieldPath::new("source.default");
    pub const OVERRIDES: FieldPath = FieldPath::new("source.overrides");

    /// Resolve every path against the project root.
    pub fn normalize(&mut self, root: &Path) {
        if let Some(default) = self.default.take() {
            self.default = Some(resolve_config_path(&default, root));
        }
        self.disabled = self
            .disabled
            .iter()
            .map(|p| resolve_config_path(p, root))
            .collect();
        self.overrides = std::mem::take(&mut self.overrides)
            .into_iter()
            .map(|(target, source)| {
                (resolve_config_path(&target, root), resolve_config_path(&source, root))
            })
            .collect();
    }

    /// Override source assigned to `target`, if any.
    pub fn override_for(&self, target: &Path) -> Option<&Path> {
        self.overrides.get(target).map(PathBuf::as_path)
    }

    pub fn is_disabled(&self, target: &Path) -> bool {
        self.disabled.iter().any(|p| p == target)
    }

    /// Validate that referenced source files exist.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(default) = &self.default
            && !default.is_file()
        {
            diag.error(
                Self::DEFAULT,
                format!("source `{}` does not exist", default.display()),
            );
        }

        for (target, source) in &self.overrides {
            if !source.is_file() {
                diag.error(
                    Self::OVERRIDES,
                    format!(
                        "override `{}` for `{}` does not exist",
                        source.display(),
                        target.display()
                    ),
                );
            }
        }
    }
}
