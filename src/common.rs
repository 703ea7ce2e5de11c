//! Common utility functions shared across modules
//!
//! Whitespace normalisation, lossy file reads and the timestamp helpers used
//! for report naming.

use std::path::Path;

/// Filename timestamp format (`YYYYMMDDHHMMSS`, UTC)
pub const TIMESTAMP_FMT: &str = "%Y%m%d%H%M%S";

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// # Examples
/// ```
/// assert_eq!(meridian::common::normalize_ws("  Map<K,\n   V>  "), "Map<K, V>");
/// ```
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a modifier run such as `"public static "` into its words.
pub fn split_words(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

/// Read a file as UTF-8, replacing invalid sequences with U+FFFD.
///
/// Only the read itself can fail; decoding never does.
pub fn read_text_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Current UTC time formatted with [`TIMESTAMP_FMT`].
pub fn now_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FMT).to_string()
}

/// Current UTC time as RFC 3339 with second precision and a `Z` suffix.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Default report file name: `appinfo_YYYYMMDDHHMMSS.json`
pub fn default_output_name() -> String {
    format!("appinfo_{}.json", now_timestamp())
}

/// Render a path with `/` separators regardless of platform.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
