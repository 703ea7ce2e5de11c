//! Directory walking: descriptor discovery and per-project source listing.
//!
//! Symlinks are not followed. Both walks return sorted paths so repeated
//! scans of an unchanged tree visit files in the same order.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::filter::{SourceFilter, INTERNAL_IGNORE_DIRS};
use crate::diagnostics::ScanDiagnostic;
use crate::project::Ecosystem;

/// A descriptor file found under the root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscoveredDescriptor {
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
}

/// Result of a walk: what was found plus the entries that could not be read.
#[derive(Debug)]
pub struct WalkOutcome<T> {
    pub found: Vec<T>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl<T> Default for WalkOutcome<T> {
    fn default() -> Self {
        WalkOutcome {
            found: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

fn is_internal_ignore(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && INTERNAL_IGNORE_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
}

fn walk_diagnostic(err: &walkdir::Error, fallback: &Path) -> ScanDiagnostic {
    let path = err.path().unwrap_or(fallback);
    tracing::warn!(path = %path.display(), error = %err, "directory walk failed");
    ScanDiagnostic::walk(path.to_string_lossy(), err.to_string())
}

/// Find every descriptor of the given ecosystems below `root`.
pub fn discover_descriptors(root: &Path, ecosystems: &[Ecosystem]) -> WalkOutcome<DiscoveredDescriptor> {
    let mut outcome = WalkOutcome::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_internal_ignore(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                outcome.diagnostics.push(walk_diagnostic(&err, root));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        for ecosystem in ecosystems {
            if ecosystem.is_descriptor(&file_name) {
                outcome.found.push(DiscoveredDescriptor {
                    path: entry.path().to_path_buf(),
                    ecosystem: *ecosystem,
                });
            }
        }
    }

    outcome.found.sort();
    outcome.found.dedup();
    tracing::debug!(
        root = %root.display(),
        descriptors = outcome.found.len(),
        "descriptor discovery finished"
    );
    outcome
}

/// List the source files of one project.
pub fn collect_source_files(filter: &SourceFilter) -> WalkOutcome<PathBuf> {
    let mut outcome = WalkOutcome::default();

    for walk_root in filter.walk_roots() {
        let walker = WalkDir::new(&walk_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !(e.depth() > 0 && e.file_type().is_dir() && filter.is_output_dir(e.path())));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    outcome.diagnostics.push(walk_diagnostic(&err, &walk_root));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match filter.should_skip(entry.path()) {
                None => outcome.found.push(entry.into_path()),
                Some(reason) => {
                    tracing::trace!(path = %entry.path().display(), %reason, "skipping file");
                }
            }
        }
    }

    outcome.found.sort();
    outcome.found.dedup();
    outcome
}
