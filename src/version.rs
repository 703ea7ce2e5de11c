//! Version and build information for Meridian
//!
//! Provides the version string and the commit it was built from.

/// Get the full version string including build metadata
///
/// Returns format: "meridian {version} ({commit})"
pub fn version() -> String {
    format!("meridian {} ({})", package_version(), build_commit())
}

/// Get the package version (e.g., "0.4.2")
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get the build commit SHA
///
/// Returns "unknown" if not built with commit info
pub fn build_commit() -> &'static str {
    option_env!("MERIDIAN_COMMIT_SHA").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_contains_package_version() {
        let v = version();
        assert!(v.starts_with("meridian "));
        assert!(v.contains(package_version()));
        assert!(v.ends_with(&format!("({})", build_commit())));
        assert!(!v.contains("rustc"));
    }
}
