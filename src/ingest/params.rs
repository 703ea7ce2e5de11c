//! Depth-aware splitting of parameter lists and comma-separated clauses.

use crate::common::normalize_ws;

/// Split `block` on commas that sit outside any `<...>` nesting.
///
/// Depth rises on `<` and falls (never below zero) on `>`. Segments are
/// trimmed and empty segments are dropped, so `""` and trailing commas
/// yield nothing extra.
///
/// # Examples
/// ```
/// use meridian::ingest::params::split_params;
///
/// assert_eq!(split_params("Map<K, V> a, int b"), vec!["Map<K, V> a", "int b"]);
/// assert!(split_params("").is_empty());
/// ```
pub fn split_params(block: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut depth: usize = 0;
    let mut current = String::new();

    for ch in block.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                push_segment(&mut params, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_segment(&mut params, &current);

    params
}

fn push_segment(params: &mut Vec<String>, segment: &str) {
    let part = segment.trim();
    if !part.is_empty() {
        params.push(part.to_string());
    }
}

/// Split a base/interface/throws clause into whitespace-normalised entries.
///
/// Uses the same depth rule as [`split_params`] so `IDictionary<K, V>` stays
/// one entry.
pub fn split_clause(clause: Option<&str>) -> Vec<String> {
    match clause {
        Some(text) => split_params(text)
            .iter()
            .map(|s| normalize_ws(s))
            .filter(|s| !s.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Drop a top-level default value (`int x = 5` -> `int x`).
///
/// An `=` inside `<...>` or `(...)` is not a default.
pub fn strip_default_value(param: &str) -> &str {
    let mut depth: usize = 0;
    for (idx, ch) in param.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return param[..idx].trim_end(),
            _ => {}
        }
    }
    param
}
