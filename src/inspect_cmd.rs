//! Inspect command implementation
//!
//! Runs the extractor over a single file, outside of any project.

use anyhow::{Context, Result};
use meridian::common::read_text_lossy;
use meridian::output::render_file_summary;
use meridian::{detect_language, extract_text, generate_execution_id, output_json, JsonResponse, OutputFormat};
use std::path::PathBuf;

pub fn run_inspect(file: PathBuf, output_format: OutputFormat) -> Result<()> {
    let language = detect_language(&file)
        .ok_or_else(|| anyhow::anyhow!("Unsupported file type: {} (expected .cs or .java)", file.display()))?;
    let source = read_text_lossy(&file).with_context(|| format!("failed to read {}", file.display()))?;

    let summary = extract_text(language, &file.to_string_lossy(), &source);

    match output_format {
        OutputFormat::Json => {
            let exec_id = generate_execution_id();
            output_json(&JsonResponse::new(summary, &exec_id))?;
        }
        OutputFormat::Human => print!("{}", render_file_summary(&summary)),
    }
    Ok(())
}
