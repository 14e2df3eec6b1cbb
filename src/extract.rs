//! Best-effort extraction of labeled fields from free-form model replies.
//!
//! Replies are expected to contain lines of the form `LABEL: value`, but
//! nothing is guaranteed; everything here degrades to a fixed sentinel
//! instead of failing. The quirks are load-bearing for downstream prompts:
//! labels match as case-insensitive substrings, the first matching line with
//! a colon wins, and an apologetic reply is treated as "nothing found".

use tracing::debug;

/// Sentinel returned whenever a field cannot be extracted.
pub const NO_ISSUES: &str = "No issues";

/// Extract the value of the first `LABEL: value` line whose uppercased form
/// contains the uppercased `label`.
///
/// Matching lines without a colon are skipped; a later colon-bearing match
/// still wins. Returns [`NO_ISSUES`] when the input is empty, contains
/// `sorry` in any case (refusal replies carry no findings), or the scan
/// finds no matching line with a colon to split at.
pub fn extract_field(result: &str, label: &str) -> String {
    if result.is_empty() || result.to_lowercase().contains("sorry") {
        debug!(label, "extract_field: empty or apologetic reply, using sentinel");
        return NO_ISSUES.to_string();
    }

    let needle = label.to_uppercase();
    for line in result.lines() {
        if !line.to_uppercase().contains(&needle) {
            continue;
        }
        if let Some((_, value)) = line.split_once(':') {
            return value.trim().to_string();
        }
    }

    debug!(label, "extract_field: no matching line with a colon, using sentinel");
    NO_ISSUES.to_string()
}
