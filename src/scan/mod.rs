//! Scan driver: root directory in, [`Report`] out.
//!
//! Order of work:
//! 1. Discover descriptors below the root (sorted)
//! 2. Parse every descriptor; failures become diagnostics
//! 3. For each parsed project, list and extract its sources
//! 4. Build the relationship graph over all parsed projects
//!
//! Step 4 runs only after every project is parsed. Within step 3 the files
//! of one project may be extracted in parallel; projects are processed one
//! at a time.

pub mod aggregate;
pub mod discover;
pub mod filter;

pub use aggregate::{summarize_sources, NamespaceSummary, SourceSummary};
pub use discover::{collect_source_files, discover_descriptors, DiscoveredDescriptor};
pub use filter::SourceFilter;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::common::now_rfc3339;
use crate::diagnostics::{sort_diagnostics, ScanDiagnostic};
use crate::error_codes;
use crate::graph::build_graph;
use crate::output::{ProjectSummary, Report};
use crate::project::{parse_descriptor, Ecosystem, ProjectDescriptor};
use crate::validation::canonicalize_path;

/// Scan configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: PathBuf,
    /// Ecosystems whose descriptors are discovered
    pub ecosystems: Vec<Ecosystem>,
    /// Globs relative to each project directory
    pub exclude_patterns: Vec<String>,
    /// Extract the files of a project in parallel
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            root: PathBuf::from("."),
            ecosystems: Ecosystem::ALL.to_vec(),
            exclude_patterns: Vec::new(),
            parallel: true,
        }
    }
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ScanConfig {
            root: root.into(),
            ..Default::default()
        }
    }
}

/// Errors that abort a scan before any descriptor is read.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("root directory does not exist: {0}")]
    RootNotFound(String),

    #[error("root is not a directory: {0}")]
    RootNotADirectory(String),

    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
}

impl ScanError {
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::RootNotFound(_) => error_codes::MER_IO_001_ROOT_NOT_FOUND,
            ScanError::RootNotADirectory(_) => error_codes::MER_IO_004_ROOT_NOT_DIRECTORY,
            ScanError::InvalidGlob { .. } => error_codes::MER_CFG_001_INVALID_GLOB,
        }
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let resolved = canonicalize_path(root)
        .map_err(|_| ScanError::RootNotFound(root.to_string_lossy().to_string()))?;
    if !resolved.is_dir() {
        return Err(ScanError::RootNotADirectory(resolved.to_string_lossy().to_string()));
    }
    Ok(resolved)
}

/// Run a full scan.
///
/// Only an unusable root or an invalid glob is an error. Unparsable
/// descriptors and unreadable files are recorded in
/// [`Report::diagnostics`] and the scan continues.
pub fn run_scan(config: &ScanConfig) -> Result<Report, ScanError> {
    let root = resolve_root(&config.root)?;
    let excludes = filter::compile_globs(&config.exclude_patterns)
        .map_err(|(pattern, message)| ScanError::InvalidGlob { pattern, message })?;

    let mut diagnostics: Vec<ScanDiagnostic> = Vec::new();

    let discovery = discover_descriptors(&root, &config.ecosystems);
    diagnostics.extend(discovery.diagnostics);
    if discovery.found.is_empty() {
        tracing::debug!(root = %root.display(), "no project descriptors found");
    }

    let mut descriptors: Vec<ProjectDescriptor> = Vec::with_capacity(discovery.found.len());
    for found in &discovery.found {
        match parse_descriptor(found.ecosystem, &found.path) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(err) => {
                tracing::warn!(path = %found.path.display(), code = err.code(), error = %err, "skipping descriptor");
                diagnostics.push(ScanDiagnostic::descriptor(&err));
            }
        }
    }

    let mut projects = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let ecosystem = descriptor.ecosystem();
        let filter = SourceFilter::new(Path::new(descriptor.dir()), ecosystem, excludes.clone());

        let listing = collect_source_files(&filter);
        tracing::debug!(
            project = %descriptor.descriptor_path(),
            files = listing.found.len(),
            "summarizing sources"
        );
        let (mut source_summary, read_diagnostics) =
            summarize_sources(ecosystem.language(), &listing.found, config.parallel);
        source_summary.error = listing.diagnostics.first().map(|d| d.message.clone());

        diagnostics.extend(listing.diagnostics);
        diagnostics.extend(read_diagnostics);
        projects.push(ProjectSummary {
            descriptor: descriptor.clone(),
            source_summary,
        });
    }

    let relationships = build_graph(&descriptors);
    sort_diagnostics(&mut diagnostics);

    let report = Report::new(
        now_rfc3339(),
        root.to_string_lossy().to_string(),
        projects,
        relationships,
        diagnostics,
    );
    tracing::info!(
        root = %report.root_dir,
        projects = report.project_count,
        files = report.file_count(),
        types = report.type_count(),
        edges = report.relationships.edge_count(),
        diagnostics = report.diagnostics.len(),
        "scan complete"
    );
    Ok(report)
}
