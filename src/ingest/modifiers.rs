//! Leading attribute / annotation collection.

/// Collect the attribute lines directly above the declaration at `start`.
///
/// Walks upward from the line containing `start`: blank lines are skipped,
/// lines whose trimmed text begins with `marker` (`[` for C#, `@` for Java)
/// are collected, and the first other line stops the walk. Text on the
/// declaration's own line is never collected. The result is in top-to-bottom
/// order.
///
/// # Examples
/// ```
/// use meridian::ingest::modifiers::collect_leading;
///
/// let text = "@Entity\n\n@Table(name = x)\npublic class User {}";
/// let start = text.find("public").unwrap();
/// assert_eq!(collect_leading(text, start, '@'), vec!["@Entity", "@Table(name = x)"]);
/// ```
pub fn collect_leading(text: &str, start: usize, marker: char) -> Vec<String> {
    let start = floor_char_boundary(text, start.min(text.len()));
    let mut collected = Vec::new();

    // End (exclusive) of the line above the current one
    let mut line_end = match text[..start].rfind('\n') {
        Some(nl) => nl,
        None => return collected,
    };

    loop {
        let line_start = text[..line_end].rfind('\n').map(|nl| nl + 1).unwrap_or(0);
        let line = text[line_start..line_end].trim();

        if line.starts_with(marker) {
            collected.push(line.to_string());
        } else if !line.is_empty() {
            break;
        }

        if line_start == 0 {
            break;
        }
        line_end = line_start - 1;
    }

    collected.reverse();
    collected
}

/// True when `pos` sits inside an attribute or annotation on its own line:
/// directly after `@`, or after an unclosed `[`.
pub fn inside_attribute(text: &str, pos: usize) -> bool {
    let pos = floor_char_boundary(text, pos.min(text.len()));
    let line_start = text[..pos].rfind('\n').map(|nl| nl + 1).unwrap_or(0);
    let prefix = &text[line_start..pos];
    if prefix.ends_with('@') {
        return true;
    }
    let mut depth: usize = 0;
    for ch in prefix.chars() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth > 0
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
