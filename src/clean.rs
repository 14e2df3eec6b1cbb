//! Code block normalization shared by the verbose prompt builders.

use tracing::trace;

/// Normalize a code block for embedding into a prompt:
///
/// - strip leading/trailing blank lines,
/// - remove the minimum common leading-whitespace width from every non-blank
///   line, preserving relative indentation,
/// - collapse blank lines to empty strings.
///
/// Widths are counted in raw characters, so mixed tabs and spaces yield
/// deterministic but unaligned results. Empty or whitespace-only input
/// yields `""`. Idempotent.
pub fn normalize_block(code: &str) -> String {
    let all: Vec<&str> = code.lines().collect();

    let Some(first) = all.iter().position(|line| !line.trim().is_empty()) else {
        trace!("normalize_block: no non-blank lines; nothing to do");
        return String::new();
    };
    let last = all
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);
    let lines = &all[first..=last];

    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace_width(line))
        .min()
        .unwrap_or(0);

    let cleaned: Vec<&str> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                strip_leading_chars(line, min_indent)
            }
        })
        .collect();

    cleaned.join("\n")
}

/// Count leading whitespace characters (not bytes) of a line.
fn leading_whitespace_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drop the first `count` characters of a line.
fn strip_leading_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}
