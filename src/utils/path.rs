//! Path normalization utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to a lexical cleanup, joined with the current directory
/// when relative, so files that do not exist yet still compare equal.
///
/// # Example
/// ```ignore
/// let abs = normalize_path(Path::new("./res/mipmap-mdpi/ic_launcher.png"));
/// ```
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            clean_path(path)
        } else {
            std::env::current_dir()
                .map_or_else(|_| clean_path(path), |cwd| clean_path(&cwd.join(path)))
        }
    })
}

/// Drop `.` components and fold `..` into its parent without touching the disk.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Display `path` relative to `root` when it lies inside it.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let normalized = normalize_path(Path::new("/absolute/path/file.png"));
        assert_eq!(normalized, PathBuf::from("/absolute/path/file.png"));
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.png"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(
            clean_path(Path::new("/project/./res/../assets/icon.svg")),
            PathBuf::from("/project/assets/icon.svg")
        );
        assert_eq!(clean_path(Path::new("../x.png")), PathBuf::from("../x.png"));
    }

    #[test]
    fn test_relative_to() {
        let root = Path::new("/project");
        assert_eq!(
            relative_to(Path::new("/project/res/a.png"), root),
            PathBuf::from("res/a.png")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere/a.png"), root),
            PathBuf::from("/elsewhere/a.png")
        );
    }
}
