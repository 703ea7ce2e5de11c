//! Meridian: a deterministic structural inspector for multi-project source trees
//!
//! Meridian discovers build descriptors (`.csproj`, `pom.xml`) under a root,
//! scans the sources of every project, and reports an approximate structural
//! model (namespaces, types, methods, constructors, parameters, attributes)
//! together with a cross-project relationship graph. No compiler or build
//! tool is invoked.
//!
//! # Pipeline
//!
//! 1. [`scan::discover_descriptors`] walks the root
//! 2. [`project::parse_descriptor`] reads each descriptor
//! 3. [`scan::summarize_sources`] runs [`ingest`] over each project's files
//! 4. [`graph::build_graph`] resolves references across all projects
//!
//! [`scan::run_scan`] drives the whole pipeline and returns a [`Report`].
//!
//! # Position Conventions
//!
//! - **Line positions**: 1-indexed (line 1 is the first line)
//! - **Byte offsets**: 0-indexed from file start; the sanitized mirror of a
//!   file has the same byte length as the raw text, so offsets found in one
//!   are valid in the other
//!
//! # Example
//!
//! ```
//! use meridian::{extract_text, Language};
//!
//! let summary = extract_text(
//!     Language::CSharp,
//!     "Greeter.cs",
//!     "namespace Demo;\npublic class Greeter { public string Hello(string name) => name; }",
//! );
//! assert_eq!(summary.namespace.as_deref(), Some("Demo"));
//! assert_eq!(summary.types[0].methods[0].prototype, "public string Hello(string name)");
//! ```

pub mod common;
pub mod diagnostics;
pub mod error_codes;
pub mod graph;
pub mod ingest;
pub mod output;
pub mod project;
pub mod scan;
pub mod validation;
pub mod version;

pub use diagnostics::{DiagnosticStage, ScanDiagnostic, SkipReason};
pub use graph::{
    build_graph, DependencyEdge, ModuleInclusionEdge, ParentChildEdge, ProjectReferenceEdge,
    RelationshipGraph,
};
pub use ingest::detect::{detect_language, Language};
pub use ingest::{
    extract_file, extract_text, Constructor, FileSummary, Method, Parameter, TypeDeclaration,
    TypeKind,
};
pub use output::{generate_execution_id, output_json, JsonResponse, OutputFormat, ProjectSummary, Report};
pub use project::{parse_descriptor, DescriptorError, Ecosystem, ProjectDescriptor};
pub use scan::{run_scan, ScanConfig, ScanError, SourceSummary};
pub use validation::{canonicalize_path, normalize_path, PathValidationError};
