//! Configuration utility functions.

use std::path::{Path, PathBuf};

use crate::utils::path::normalize_path;

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found.
///
/// # Example
/// ```text
/// /home/user/app/android/app/src/  ← cwd
/// /home/user/app/iconsmith.toml    ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

/// Resolve a path written in the config file.
///
/// Expands `~`, joins relative paths onto `root` and normalizes the result.
pub fn resolve_config_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    };
    let full_path = if expanded.is_relative() {
        root.join(expanded)
    } else {
        expanded
    };
    normalize_path(&full_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve_config_path(Path::new("assets/icon.svg"), Path::new("/project")),
            PathBuf::from("/project/assets/icon.svg")
        );
        assert_eq!(
            resolve_config_path(Path::new("./res/../icon.svg"), Path::new("/project")),
            PathBuf::from("/project/icon.svg")
        );
    }

    #[test]
    fn test_resolve_absolute_kept() {
        assert_eq!(
            resolve_config_path(Path::new("/abs/icon.svg"), Path::new("/project")),
            PathBuf::from("/abs/icon.svg")
        );
    }

    #[test]
    fn test_resolve_tilde() {
        let expanded = shellexpand::tilde("~/icon.svg");
        if expanded.starts_with('~') {
            return;
        }
        let resolved = resolve_config_path(Path::new("~/icon.svg"), Path::new("/project"));
        assert!(!resolved.starts_with("/project"));
        assert!(resolved.ends_with("icon.svg"));
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("iconsmith.toml");
        assert_eq!(find_config_file(&config), None);

        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(&config), Some(config));
    }
}
