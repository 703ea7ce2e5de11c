//! Structured diagnostics for scan operations.
//!
//! Provides deterministic, sortable diagnostic types for skip reasons and
//! recoverable failures.

pub mod scan_diagnostics;

pub use scan_diagnostics::{sort_diagnostics, DiagnosticStage, ScanDiagnostic, SkipReason};
