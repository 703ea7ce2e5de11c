//! Source-file filtering for one project.
//!
//! Precedence, first match wins:
//! 1. Below a build-output directory (`bin/`, `obj/` for .NET)
//! 2. Outside the ecosystem's source roots (`src/main/java`, `src/test/java`)
//! 3. Extension of another language
//! 4. User exclusion globs, matched against the path relative to the
//!    project directory with `/` separators
//!
//! `should_skip` never touches the filesystem; the walker only hands it
//! regular files.

use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};

use crate::common::display_path;
use crate::diagnostics::SkipReason;
use crate::ingest::detect_language;
use crate::project::Ecosystem;

/// Directories never descended into during discovery.
pub const INTERNAL_IGNORE_DIRS: &[&str] = &[".git", ".hg", ".svn", "node_modules", "target"];

/// Compile exclusion globs.
///
/// Returns the offending pattern and the parser message on failure.
pub fn compile_globs(patterns: &[String]) -> Result<Vec<GlobMatcher>, (String, String)> {
    patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern)
                .map(|glob| glob.compile_matcher())
                .map_err(|err| (pattern.clone(), err.to_string()))
        })
        .collect()
}

/// Decides which files below a project directory are its sources.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    project_dir: PathBuf,
    ecosystem: Ecosystem,
    exclude_patterns: Vec<GlobMatcher>,
}

impl SourceFilter {
    pub fn new(project_dir: &Path, ecosystem: Ecosystem, exclude_patterns: Vec<GlobMatcher>) -> Self {
        SourceFilter {
            project_dir: project_dir.to_path_buf(),
            ecosystem,
            exclude_patterns,
        }
    }

    /// Directories to walk: the source roots that exist, or the project
    /// directory itself when the ecosystem has no fixed roots.
    pub fn walk_roots(&self) -> Vec<PathBuf> {
        let roots = self.ecosystem.source_roots();
        if roots.is_empty() {
            return vec![self.project_dir.clone()];
        }
        roots
            .iter()
            .map(|root| self.project_dir.join(root))
            .filter(|dir| dir.is_dir())
            .collect()
    }

    /// Whether the walker should skip descending into `dir`.
    pub fn is_output_dir(&self, dir: &Path) -> bool {
        dir.file_name()
            .map(|name| self.ecosystem.output_dirs().contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    /// Check if a path should be skipped, returning the reason if so.
    ///
    /// # Returns
    /// * `None` - Path is a source file of this project
    /// * `Some(reason)` - Path should be skipped
    pub fn should_skip(&self, path: &Path) -> Option<SkipReason> {
        let rel = path.strip_prefix(&self.project_dir).unwrap_or(path);

        let output_dirs = self.ecosystem.output_dirs();
        if let Some(parent) = rel.parent() {
            if parent
                .components()
                .any(|c| output_dirs.contains(&c.as_os_str().to_string_lossy().as_ref()))
            {
                return Some(SkipReason::BuildOutput);
            }
        }

        let roots = self.ecosystem.source_roots();
        if !roots.is_empty() && !roots.iter().any(|root| rel.starts_with(root)) {
            return Some(SkipReason::OutsideSourceRoot);
        }

        if detect_language(path) != Some(self.ecosystem.language()) {
            return Some(SkipReason::UnsupportedLanguage);
        }

        if !self.exclude_patterns.is_empty() {
            let rel_path = self.relative_path(path);
            if self.exclude_patterns.iter().any(|m| m.is_match(&rel_path)) {
                return Some(SkipReason::ExcludedByGlob);
            }
        }

        None
    }

    /// Path relative to the project directory, `/`-separated.
    pub fn relative_path(&self, path: &Path) -> String {
        display_path(path.strip_prefix(&self.project_dir).unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn globs(patterns: &[&str]) -> Vec<GlobMatcher> {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        compile_globs(&owned).unwrap()
    }

    #[test]
    fn test_dotnet_skips_build_output() {
        let filter = SourceFilter::new(Path::new("/w/App"), Ecosystem::Dotnet, Vec::new());
        assert_eq!(filter.should_skip(Path::new("/w/App/Program.cs")), None);
        assert_eq!(filter.should_skip(Path::new("/w/App/Sub/Model.cs")), None);
        assert_eq!(
            filter.should_skip(Path::new("/w/App/obj/Debug/AssemblyInfo.cs")),
            Some(SkipReason::BuildOutput)
        );
        assert_eq!(
            filter.should_skip(Path::new("/w/App/Sub/bin/Gen.cs")),
            Some(SkipReason::BuildOutput)
        );
        // a file merely named like an output dir is not skipped
        assert_eq!(filter.should_skip(Path::new("/w/App/bin.cs")), None);
        assert_eq!(
            filter.should_skip(Path::new("/w/App/Notes.java")),
            Some(SkipReason::UnsupportedLanguage)
        );
    }

    #[test]
    fn test_maven_source_roots() {
        let filter = SourceFilter::new(Path::new("/m/core"), Ecosystem::Maven, Vec::new());
        assert_eq!(filter.should_skip(Path::new("/m/core/src/main/java/a/A.java")), None);
        assert_eq!(filter.should_skip(Path::new("/m/core/src/test/java/a/ATest.java")), None);
        assert_eq!(
            filter.should_skip(Path::new("/m/core/src/it/java/a/IT.java")),
            Some(SkipReason::OutsideSourceRoot)
        );
        // Maven does not treat bin/ specially
        assert_eq!(filter.should_skip(Path::new("/m/core/src/main/java/bin/B.java")), None);
    }

    #[test]
    fn test_exclude_globs_relative_to_project() {
        let filter = SourceFilter::new(
            Path::new("/w/App"),
            Ecosystem::Dotnet,
            globs(&["**/*.Designer.cs", "Migrations/**"]),
        );
        assert_eq!(
            filter.should_skip(Path::new("/w/App/Forms/Main.Designer.cs")),
            Some(SkipReason::ExcludedByGlob)
        );
        assert_eq!(
            filter.should_skip(Path::new("/w/App/Migrations/0001_Init.cs")),
            Some(SkipReason::ExcludedByGlob)
        );
        assert_eq!(filter.should_skip(Path::new("/w/App/Forms/Main.cs")), None);
    }

    #[test]
    fn test_invalid_glob_reports_pattern() {
        let err = compile_globs(&["src/[".to_string()]).unwrap_err();
        assert_eq!(err.0, "src/[");
    }

    #[test]
    fn test_walk_roots_skip_missing() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path();
        fs::create_dir_all(project.join("src/main/java")).unwrap();

        let maven = SourceFilter::new(project, Ecosystem::Maven, Vec::new());
        assert_eq!(maven.walk_roots(), vec![project.join("src/main/java")]);

        let dotnet = SourceFilter::new(project, Ecosystem::Dotnet, Vec::new());
        assert_eq!(dotnet.walk_roots(), vec![project.to_path_buf()]);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let dotnet = SourceFilter::new(Path::new("/w/App"), Ecosystem::Dotnet, globs(&["**/*.cs"]));
        assert_eq!(
            dotnet.should_skip(Path::new("/w/App/obj/Gen.cs")),
            Some(SkipReason::BuildOutput)
        );
        assert_eq!(
            dotnet.should_skip(Path::new("/w/App/Model.cs")),
            Some(SkipReason::ExcludedByGlob)
        );

        let maven = SourceFilter::new(Path::new("/m"), Ecosystem::Maven, globs(&["**"]));
        assert_eq!(
            maven.should_skip(Path::new("/m/docs/Readme.cs")),
            Some(SkipReason::OutsideSourceRoot)
        );
        assert_eq!(
            maven.should_skip(Path::new("/m/src/main/java/a/Helper.cs")),
            Some(SkipReason::UnsupportedLanguage)
        );
    }
}
