//! Meridian-specific error codes
//!
//! Error codes follow the pattern: MER-{CATEGORY}-{3-digit number}
//!
//! Categories (1-3 uppercase letters):
//! - IO: I/O-related errors (root access, file reads, directory walks)
//! - XML: Build descriptor errors (.csproj / pom.xml)
//! - CFG: Configuration errors (invalid CLI values, bad globs)
//!
//! Each error code is stable and should not be reused.

/// Root directory does not exist
pub const MER_IO_001_ROOT_NOT_FOUND: &str = "MER-IO-001";

/// Source file could not be read
pub const MER_IO_002_READ_FAILED: &str = "MER-IO-002";

/// Directory walk failed below the root
pub const MER_IO_003_WALK_FAILED: &str = "MER-IO-003";

/// Root path exists but is not a directory
pub const MER_IO_004_ROOT_NOT_DIRECTORY: &str = "MER-IO-004";

/// Descriptor is not well-formed XML, even after namespace stripping
pub const MER_XML_001_MALFORMED: &str = "MER-XML-001";

/// Descriptor could not be read
pub const MER_XML_002_UNREADABLE: &str = "MER-XML-002";

/// Invalid exclusion glob
pub const MER_CFG_001_INVALID_GLOB: &str = "MER-CFG-001";

/// Error code documentation
///
/// | Code | Description | Remediation |
/// |------|-------------|-------------|
/// | MER-IO-001 | Root directory not found | Check the `--dir` argument |
/// | MER-IO-002 | Source file unreadable | Check file permissions; the file contributes no types |
/// | MER-IO-003 | Directory walk failed | Check directory permissions and symlinks |
/// | MER-IO-004 | Root is not a directory | Point `--dir` at a directory |
/// | MER-XML-001 | Malformed descriptor | Fix the XML; the project is skipped |
/// | MER-XML-002 | Descriptor unreadable | Check file permissions; the project is skipped |
/// | MER-CFG-001 | Invalid glob | Fix the `--exclude` pattern |
pub const ERROR_CODE_DOCUMENTATION: &str = "Error code documentation available in source";
