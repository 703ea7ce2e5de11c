//! Per-project source aggregation.
//!
//! Files are extracted independently (in parallel when enabled) and then
//! folded, in sorted path order, into a namespace/package map.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::diagnostics::ScanDiagnostic;
use crate::ingest::{extract_file, FileSummary, Language, TypeDeclaration};

/// Files and types grouped under one namespace or package.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub files: Vec<String>,
    pub types: Vec<TypeDeclaration>,
}

/// Source-level view of one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceSummary {
    /// Keyed by namespace; files without one use `(global)` / `(default)`
    pub namespaces: BTreeMap<String, NamespaceSummary>,
    pub file_count: usize,
    /// Set when the project's sources could not be listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Extract every file in `files`.
///
/// Output order equals input order regardless of `parallel`.
pub fn extract_all(language: Language, files: &[PathBuf], parallel: bool) -> Vec<FileSummary> {
    if parallel {
        files.par_iter().map(|path| extract_file(language, path)).collect()
    } else {
        files.iter().map(|path| extract_file(language, path)).collect()
    }
}

/// Fold file summaries into a [`SourceSummary`].
///
/// Failed files are listed under their scope key but contribute no types;
/// each one also yields a read diagnostic.
pub fn fold_summaries(summaries: Vec<FileSummary>) -> (SourceSummary, Vec<ScanDiagnostic>) {
    let mut summary = SourceSummary {
        file_count: summaries.len(),
        ..Default::default()
    };
    let mut diagnostics = Vec::new();

    for file in summaries {
        let entry = summary.namespaces.entry(file.scope_key()).or_default();
        entry.files.push(file.path.clone());
        match file.error {
            Some(error) => diagnostics.push(ScanDiagnostic::read(file.path, error)),
            None => entry.types.extend(file.types),
        }
    }

    (summary, diagnostics)
}

/// Extract and aggregate the sources of one project.
pub fn summarize_sources(
    language: Language,
    files: &[PathBuf],
    parallel: bool,
) -> (SourceSummary, Vec<ScanDiagnostic>) {
    fold_summaries(extract_all(language, files, parallel))
}
