//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Shorten `path` for display when it lives under `base`.
pub fn display_path(base: &Path, path: &Path) -> String {
    let base = normalize_path(base);
    if path.starts_with(&base) {
        relative_path(&base, path).display().to_string()
    } else {
        path.display().to_string()
    }
}
