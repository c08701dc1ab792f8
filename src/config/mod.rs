//! Project configuration management for `iconsmith.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── android    # [android]
//! │   ├── render     # [render]
//! │   ├── source     # [source]
//! │   └── target     # [[target]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # IconConfig (this file)
//! ```
//!
//! All relative paths are resolved against the directory containing the
//! config file, so the tool behaves the same from any subdirectory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AndroidConfig, BoundsConfig, RenderConfig, SourceConfig, TargetConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing iconsmith.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconConfig {
    /// Absolute path to the config file, empty when running without one
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub android: AndroidConfig,

    /// Explicit `[[target]]` entries
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetConfig>,
}

impl IconConfig {
    /// Load configuration for the given command line.
    ///
    /// Searches upward from cwd for the config file. `generate` and
    /// `targets` need one; `render` and `bounds` fall back to defaults
    /// rooted at cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => Self::from_file(&path)?,
            None if cli.requires_config() => {
                bail!(
                    "config file `{}` not found in this directory or any parent",
                    cli.config.display()
                );
            }
            None => {
                let cwd =
                    std::env::current_dir().context("Failed to get current working directory")?;
                let mut config = Self::default();
                config.root = normalize_path(&cwd);
                config
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and normalize a config file.
    ///
    /// Unknown fields are reported as warnings and otherwise ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = normalize_path(path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.normalize_paths(&root);
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        crate::utils::path::relative_to(path.as_ref(), &self.root)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Generate { args } = &cli.command {
            Self::update_option(&mut self.render.parallel, args.parallel.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.source.normalize(&root);
        self.android.normalize(&root);
        for target in &mut self.targets {
            target.normalize(&root);
        }
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors and reporting them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.render.validate(&mut diag);
        self.source.validate(&mut diag);
        self.android.validate(&mut diag);
        for target in &self.targets {
            target.validate(&mut diag);
        }
        TargetConfig::validate_unique(&self.targets, &mut diag);

        if self.source.default.is_none() && self.needs_default_source() {
            diag.error_with_hint(
                SourceConfig::DEFAULT,
                "some targets have no override and no default source is set",
                "set `default` under [source]",
            );
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Whether any enabled target would fall back to the default source.
    fn needs_default_source(&self) -> bool {
        let explicit = self.targets.iter().any(|t| {
            t.enabled
                && t.source.is_none()
                && self.source.override_for(&t.path).is_none()
                && !self.source.is_disabled(&t.path)
        });
        explicit || self.android.is_enabled()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config without normalization.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> IconConfig {
    let (parsed, ignored) = IconConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_toml() {
        assert!(IconConfig::parse_with_ignored("[render\nmeasure_size = 512").is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[render]\nmeasure_size = 512\nthreshold = 3\n[unknown_section]\nfield = 1";
        let (config, ignored) = IconConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.render.measure_size, 512);
        assert!(ignored.iter().any(|f| f.contains("render.threshold")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) =
            IconConfig::parse_with_ignored("[source]\ndefault = \"icon.svg\"").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_from_file_resolves_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iconsmith.toml");
        fs::write(
            &path,
            "[source]\ndefault = \"assets/icon.svg\"\n\n[[target]]\npath = \"out/icon.png\"\nsize = 64",
        )
        .unwrap();

        let config = IconConfig::from_file(&path).unwrap();
        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.config_path, normalize_path(&path));
        assert_eq!(config.source.default, Some(root.join("assets/icon.svg")));
        assert_eq!(config.targets[0].path, root.join("out/icon.png"));
        assert_eq!(
            config.root_relative(&config.targets[0].path),
            PathBuf::from("out/icon.png")
        );
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iconsmith.toml");
        fs::write(
            &path,
            "[render]\nmeasure_size = 16\n\n[[target]]\npath = \"a.png\"\nsize = 0\n\n[[target]]\npath = \"a.png\"\nsize = 32",
        )
        .unwrap();

        let config = IconConfig::from_file(&path).unwrap();
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        // measure_size, zero size, duplicate path, missing default
        assert_eq!(diag.len(), 4);
    }

    #[test]
    fn test_validate_ok_with_override_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("icon.svg"), "<svg/>").unwrap();
        let path = dir.path().join("iconsmith.toml");
        fs::write(
            &path,
            "[[target]]\npath = \"a.png\"\nsize = 32\nsource = \"icon.svg\"",
        )
        .unwrap();

        let config = IconConfig::from_file(&path).unwrap();
        assert!(config.validate().is_ok());
    }
}
