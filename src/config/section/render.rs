//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! measure_size = 512      # SVG bounds measurement resolution (>= 64)
//! alpha_threshold = 10    # alpha above this counts as visible
//! parallel = false        # render targets on all cores
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_MEASURE_SIZE};

/// Smallest measurement render that still resolves thin glyphs.
const MIN_MEASURE_SIZE: u32 = 64;
/// Beyond this the measurement pixmap gets needlessly large.
const MAX_MEASURE_SIZE: u32 = 8192;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Square size SVG sources are rendered at to measure content bounds.
    pub measure_size: u32,

    /// Pixels with alpha at or below this are treated as transparent.
    pub alpha_threshold: u8,

    /// Render targets in parallel instead of one after another.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            measure_size: DEFAULT_MEASURE_SIZE,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            parallel: false,
        }
    }
}

impl RenderConfig {
    pub const MEASURE_SIZE: FieldPath = FieldPath::new("render.measure_size");
    pub const ALPHA_THRESHOLD: FieldPath = FieldPath::new("render.alpha_threshold");

    /// Validate render settings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.measure_size < MIN_MEASURE_SIZE {
            diag.error_with_hint(
                Self::MEASURE_SIZE,
                format!("must be at least {MIN_MEASURE_SIZE}, got {}", self.measure_size),
                format!("the default is {DEFAULT_MEASURE_SIZE}"),
            );
        } else if self.measure_size > MAX_MEASURE_SIZE {
            diag.error(
                Self::MEASURE_SIZE,
                format!("must be at most {MAX_MEASURE_SIZE}, got {}", self.measure_size),
            );
        } else if self.measure_size < DEFAULT_MEASURE_SIZE {
            diag.warn(
                Self::MEASURE_SIZE,
                "values below 512 may quantize the bounds of small or thin artwork",
            );
        }

        if self.alpha_threshold == u8::MAX {
            diag.error(
                Self::ALPHA_THRESHOLD,
                "255 leaves no pixel visible, every source would measure as full",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_render_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.render.measure_size, 512);
        assert_eq!(config.render.alpha_threshold, 10);
        assert!(!config.render.parallel);
    }

    #[test]
    fn test_render_custom() {
        let config =
            test_parse_config("[render]\nmeasure_size = 1024\nalpha_threshold = 0\nparallel = true");
        assert_eq!(config.render.measure_size, 1024);
        assert_eq!(config.render.alpha_threshold, 0);
        assert!(config.render.parallel);
    }

    #[test]
    fn test_validate_measure_size() {
        let mut diag = ConfigDiagnostics::new();
        RenderConfig { measure_size: 16, ..Default::default() }.validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        RenderConfig { measure_size: 256, ..Default::default() }.validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_validate_threshold() {
        let mut diag = ConfigDiagnostics::new();
        RenderConfig { alpha_threshold: 255, ..Default::default() }.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
