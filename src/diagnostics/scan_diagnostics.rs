//! Scan diagnostics: skip reasons and recoverable failures.
//!
//! Diagnostics are data, not errors: a scan records them and keeps going.
//! They sort deterministically so identical trees give identical reports.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error_codes;
use crate::project::DescriptorError;

/// Reason why a source file was not extracted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Below a build-output directory (`bin/`, `obj/`)
    BuildOutput,
    /// Outside the ecosystem's source roots
    OutsideSourceRoot,
    /// Excluded by a `--exclude` glob
    ExcludedByGlob,
    /// Extension does not belong to the project's language
    UnsupportedLanguage,
}

impl SkipReason {
    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::BuildOutput => "build output directory",
            SkipReason::OutsideSourceRoot => "outside source roots",
            SkipReason::ExcludedByGlob => "excluded by pattern",
            SkipReason::UnsupportedLanguage => "not a source file of this project",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Pipeline stage a diagnostic comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStage {
    /// Walking the root or a project directory
    Discover,
    /// Parsing a build descriptor
    Descriptor,
    /// Reading a source file
    Read,
}

impl DiagnosticStage {
    pub fn sort_key(&self) -> u8 {
        match self {
            DiagnosticStage::Discover => 0,
            DiagnosticStage::Descriptor => 1,
            DiagnosticStage::Read => 2,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticStage::Discover => "walking directories",
            DiagnosticStage::Descriptor => "parsing descriptor",
            DiagnosticStage::Read => "reading source file",
        }
    }
}

impl fmt::Display for DiagnosticStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One recoverable failure recorded in the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub path: String,
    pub stage: DiagnosticStage,
    /// Stable `MER-*` code
    pub code: String,
    pub message: String,
}

impl ScanDiagnostic {
    pub fn new(path: impl Into<String>, stage: DiagnosticStage, code: &str, message: impl Into<String>) -> Self {
        ScanDiagnostic {
            path: path.into(),
            stage,
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// A descriptor that was skipped.
    pub fn descriptor(err: &DescriptorError) -> Self {
        Self::new(err.path(), DiagnosticStage::Descriptor, err.code(), err.to_string())
    }

    /// A source file that could not be read.
    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, DiagnosticStage::Read, error_codes::MER_IO_002_READ_FAILED, message)
    }

    /// A directory entry the walker could not visit.
    pub fn walk(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, DiagnosticStage::Discover, error_codes::MER_IO_003_WALK_FAILED, message)
    }

    /// Primary: path. Secondary: stage.
    pub fn sort_key(&self) -> (&str, u8) {
        (&self.path, self.stage.sort_key())
    }
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} while {}: {}", self.code, self.path, self.stage, self.message)
    }
}

/// Sort diagnostics into report order.
pub fn sort_diagnostics(diagnostics: &mut [ScanDiagnostic]) {
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.message.cmp(&b.message)));
}
