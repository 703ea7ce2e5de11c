//! Path normalisation utilities.
//!
//! Descriptor indices and include-path resolution must agree on one spelling
//! of every path. Existing paths are canonicalised (symlinks resolved);
//! paths that do not exist are normalised lexically so unresolved references
//! still produce a stable absolute path.

use std::path::{Component, Path, PathBuf};

/// Error types for path validation.
#[derive(Debug, thiserror::Error)]
pub enum PathValidationError {
    /// Path cannot be canonicalized (doesn't exist or permission denied)
    #[error("cannot canonicalize path: {0}")]
    CannotCanonicalize(String),
}

/// Canonicalize a path using std::fs::canonicalize.
///
/// Returns an error if the path doesn't exist or cannot be accessed.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, PathValidationError> {
    std::fs::canonicalize(path)
        .map_err(|_| PathValidationError::CannotCanonicalize(path.to_string_lossy().to_string()))
}

/// Normalise `.` and `..` components without touching the filesystem.
///
/// `..` above the root is dropped for absolute paths and kept for relative
/// ones.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use meridian::validation::normalize_lexically;
///
/// assert_eq!(
///     normalize_lexically(Path::new("/work/App/../Lib/./Lib.csproj")),
///     Path::new("/work/Lib/Lib.csproj")
/// );
/// ```
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonicalise when the path exists, otherwise normalise lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
    canonicalize_path(path).unwrap_or_else(|_| normalize_lexically(path))
}

/// Resolve an include path as written in a descriptor against a base directory.
///
/// Backslash separators (the MSBuild convention) are accepted on every
/// platform.
pub fn resolve_include(base_dir: &Path, include: &str) -> PathBuf {
    let include = if std::path::MAIN_SEPARATOR == '\\' {
        include.to_string()
    } else {
        include.replace('\\', "/")
    };
    let candidate = Path::new(&include);
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base_dir.join(candidate)
    };
    normalize_path(&joined)
}
