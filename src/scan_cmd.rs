//! Scan command implementation

use anyhow::Result;
use meridian::common::default_output_name;
use meridian::output::{render_report, write_json_file};
use meridian::{output_json, run_scan, DiagnosticStage, OutputFormat, ScanConfig};
use std::path::{Path, PathBuf};

/// Absolute form of `out` without requiring it to exist yet.
fn absolute_output(out: &Path) -> PathBuf {
    if out.is_absolute() {
        return out.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(out))
        .unwrap_or_else(|_| out.to_path_buf())
}

/// Run a scan and write its report.
///
/// A missing root surfaces as [`meridian::ScanError::RootNotFound`] inside
/// the returned error so the caller can pick the exit code.
pub fn run_scan_cmd(
    config: ScanConfig,
    out: Option<PathBuf>,
    compact: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let report = run_scan(&config)?;

    // Descriptors that failed to parse were still found
    let descriptors_seen = report
        .diagnostics
        .iter()
        .any(|d| d.stage == DiagnosticStage::Descriptor);
    if report.project_count == 0 && !descriptors_seen {
        eprintln!(
            "Warning: No project descriptors found under {}",
            report.root_dir
        );
    }

    let out_path = absolute_output(&out.unwrap_or_else(|| PathBuf::from(default_output_name())));
    write_json_file(&out_path, &report, compact)?;

    match output_format {
        OutputFormat::Json => {
            // stdout carries only the report
            output_json(&report)?;
            eprintln!("Wrote {}", out_path.display());
        }
        OutputFormat::Human => {
            print!("{}", render_report(&report));
            println!("Wrote {}", out_path.display());
        }
    }
    Ok(())
}
