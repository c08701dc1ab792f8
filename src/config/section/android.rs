//! `[android]` section configuration.
//!
//! Expands Android launcher icons across every `mipmap-*` density using the
//! static size tables, without walking the resource tree.
//!
//! # Example
//!
//! ```toml
//! [android]
//! res = ["android/app/src/main/res"]
//! icons = ["ic_launcher", "ic_launcher_round"]
//! adaptive = ["ic_launcher_foreground", "ic_launcher_background"]
//! notification = false
//! safe_zone = true
//! detect_bounds = false
//! create_missing = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::util::resolve_config_path;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Resource roots containing `mipmap-*` directories.
    pub res: Vec<PathBuf>,

    /// Legacy launcher icon names (48dp base), without extension.
    pub icons: Vec<String>,

    /// Adaptive icon layer names (108dp base), without extension.
    pub adaptive: Vec<String>,

    /// Also produce `ic_notification.png` (48dp base).
    pub notification: bool,

    /// Keep adaptive foreground content inside the 72dp safe zone.
    pub safe_zone: bool,

    /// Frame each existing file by its current visible content.
    pub detect_bounds: bool,

    /// Include density files that do not exist yet.
    pub create_missing: bool,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            res: Vec::new(),
            icons: vec!["ic_launcher".into(), "ic_launcher_round".into()],
            adaptive: vec![
                "ic_launcher_foreground".into(),
                "ic_launcher_background".into(),
            ],
            notification: false,
            safe_zone: true,
            detect_bounds: false,
            create_missing: false,
        }
    }
}

impl AndroidConfig {
    pub const RES: FieldPath = FieldPath::new("android.res");
    pub const ICONS: FieldPath = FieldPath::new("android.icons");

    pub fn is_enabled(&self) -> bool {
        !self.res.is_empty()
    }

    pub fn normalize(&mut self, root: &Path) {
        self.res = self
            .res
            .iter()
            .map(|p| resolve_config_path(p, root))
            .collect();
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for res in &self.res {
            if !res.is_dir() {
                diag.warn(
                    Self::RES,
                    format!("resource directory `{}` does not exist", res.display()),
                );
            }
        }

        for name in self.icons.iter().chain(&self.adaptive) {
            if name.ends_with(".png") || name.contains('/') {
                diag.error_with_hint(
                    Self::ICONS,
                    format!("`{name}` must be a bare icon name"),
                    "drop the extension and directory, e.g. \"ic_launcher\"",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_android_defaults() {
        let config = test_parse_config("");
        assert!(!config.android.is_enabled());
        assert_eq!(config.android.icons, ["ic_launcher", "ic_launcher_round"]);
        assert!(config.android.safe_zone);
        assert!(!config.android.create_missing);
    }

    #[test]
    fn test_android_custom() {
        let config = test_parse_config(
            "[android]\nres = [\"app/res\"]\nicons = [\"ic_launcher\"]\nadaptive = []\nnotification = true",
        );
        assert!(config.android.is_enabled());
        assert_eq!(config.android.icons, ["ic_launcher"]);
        assert!(config.android.adaptive.is_empty());
        assert!(config.android.notification);
    }

    #[test]
    fn test_validate_icon_names() {
        let android = AndroidConfig {
            icons: vec!["ic_launcher.png".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        android.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
