//! Report types and output rendering.
//!
//! The scan report is written as schema-versioned JSON; `--output human`
//! prints a short text summary instead.

pub mod command;
pub mod human;
pub mod report;

pub use command::{
    generate_execution_id, output_json, write_json_file, JsonResponse, OutputFormat,
    MERIDIAN_JSON_SCHEMA_VERSION,
};
pub use human::{render_file_summary, render_report};
pub use report::{ProjectSummary, Report};
