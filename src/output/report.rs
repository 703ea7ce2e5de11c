//! The scan report.
//!
//! One [`Report`] per scan. Its JSON encoding is the tool's primary output;
//! every field apart from `generated_at` is a pure function of the tree.

use serde::{Deserialize, Serialize};

use crate::diagnostics::ScanDiagnostic;
use crate::graph::RelationshipGraph;
use crate::project::ProjectDescriptor;
use crate::scan::SourceSummary;

use super::command::MERIDIAN_JSON_SCHEMA_VERSION;

/// A parsed project and its aggregated sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSummary {
    /// Descriptor fields, tagged with `ecosystem`
    #[serde(flatten)]
    pub descriptor: ProjectDescriptor,
    pub source_summary: SourceSummary,
}

impl ProjectSummary {
    /// Number of types across every namespace.
    pub fn type_count(&self) -> usize {
        self.source_summary
            .namespaces
            .values()
            .map(|ns| ns.types.len())
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub schema_version: String,
    /// UTC, RFC 3339 with second precision
    pub generated_at: String,
    pub root_dir: String,
    pub project_count: usize,
    pub projects: Vec<ProjectSummary>,
    pub relationships: RelationshipGraph,
    /// Skipped descriptors and unreadable files, sorted by path
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl Report {
    pub fn new(
        generated_at: String,
        root_dir: String,
        projects: Vec<ProjectSummary>,
        relationships: RelationshipGraph,
        diagnostics: Vec<ScanDiagnostic>,
    ) -> Self {
        Report {
            schema_version: MERIDIAN_JSON_SCHEMA_VERSION.to_string(),
            generated_at,
            root_dir,
            project_count: projects.len(),
            projects,
            relationships,
            diagnostics,
        }
    }

    pub fn file_count(&self) -> usize {
        self.projects
            .iter()
            .map(|p| p.source_summary.file_count)
            .sum()
    }

    pub fn type_count(&self) -> usize {
        self.projects.iter().map(ProjectSummary::type_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::csproj::parse_csproj;
    use std::path::Path;

    fn sample() -> Report {
        let csproj = parse_csproj(
            Path::new("/w/App/App.csproj"),
            "<Project><PropertyGroup><AssemblyName>App</AssemblyName></PropertyGroup></Project>",
        )
        .unwrap();
        let project = ProjectSummary {
            descriptor: ProjectDescriptor::Dotnet(csproj),
            source_summary: SourceSummary::default(),
        };
        Report::new(
            "2026-01-02T03:04:05Z".into(),
            "/w".into(),
            vec![project],
            RelationshipGraph::default(),
            Vec::new(),
        )
    }

    #[test]
    fn test_project_fields_are_flattened() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["schema_version"], MERIDIAN_JSON_SCHEMA_VERSION);
        assert_eq!(json["project_count"], 1);

        let project = &json["projects"][0];
        assert_eq!(project["ecosystem"], "dotnet");
        assert_eq!(project["csproj_path"], "/w/App/App.csproj");
        assert_eq!(project["assembly_name"], "App");
        assert_eq!(project["source_summary"]["file_count"], 0);
        assert!(project.get("descriptor").is_none());
    }

    #[test]
    fn test_report_json_reads_back() {
        let report = sample();
        let text = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&text).unwrap();
        assert_eq!(back, report);
    }
}
