//! Plain-text rendering for `--output human`.

use std::fmt::Write as _;

use crate::ingest::{FileSummary, TypeDeclaration};

use super::report::Report;

/// Multi-line scan summary: totals, one line per project, then diagnostics.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Scanned {}: {} project(s), {} file(s), {} type(s)",
        report.root_dir,
        report.project_count,
        report.file_count(),
        report.type_count()
    );

    for project in &report.projects {
        let descriptor = &project.descriptor;
        let _ = writeln!(
            out,
            "  [{}] {}  {}  ({} file(s), {} type(s))",
            descriptor.ecosystem(),
            descriptor.display_name(),
            descriptor.descriptor_path(),
            project.source_summary.file_count,
            project.type_count()
        );
    }

    let graph = &report.relationships;
    let internal = graph.dependencies.iter().filter(|d| d.internal).count();
    let _ = writeln!(
        out,
        "Relationships: {} project reference(s), {} dependency edge(s) ({} internal)",
        graph.project_references.len(),
        graph.dependencies.len(),
        internal
    );
    if !graph.parent_child.is_empty() || !graph.module_inclusion.is_empty() {
        let _ = writeln!(
            out,
            "  {} parent link(s), {} module inclusion(s)",
            graph.parent_child.len(),
            graph.module_inclusion.len()
        );
    }

    if !report.diagnostics.is_empty() {
        let _ = writeln!(out, "Diagnostics: {}", report.diagnostics.len());
        for diag in &report.diagnostics {
            let _ = writeln!(out, "  {}", diag);
        }
    }
    out
}

fn type_header(decl: &TypeDeclaration) -> String {
    let mut header = String::new();
    for modifier in &decl.modifiers {
        header.push_str(modifier);
        header.push(' ');
    }
    header.push_str(decl.kind.keyword());
    header.push(' ');
    header.push_str(&decl.name);
    if let Some(tp) = &decl.type_params {
        header.push_str(tp);
    }
    let bases: Vec<&str> = decl
        .base_types
        .iter()
        .chain(&decl.extends)
        .chain(&decl.implements)
        .map(String::as_str)
        .collect();
    if !bases.is_empty() {
        header.push_str(" : ");
        header.push_str(&bases.join(", "));
    }
    header
}

/// Outline of one extracted file.
pub fn render_file_summary(summary: &FileSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})  scope {}",
        summary.path,
        summary.language,
        summary.scope_key()
    );
    if let Some(error) = &summary.error {
        let _ = writeln!(out, "  error: {}", error);
        return out;
    }

    for decl in &summary.types {
        let _ = writeln!(out, "  {}  (line {})", type_header(decl), decl.line);
        for attribute in &decl.attributes {
            let _ = writeln!(out, "    {}", attribute);
        }
        for ctor in &decl.constructors {
            let _ = writeln!(out, "    ctor   {}  (line {})", ctor.prototype, ctor.line);
        }
        for method in &decl.methods {
            let _ = writeln!(out, "    method {}  (line {})", method.prototype, method.line);
        }
    }
    out
}
