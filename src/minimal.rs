//! Compact prompt builder for models that drift on long instructions
//! (small coder models in particular).
//!
//! Trades fidelity for compliance: code is hard-truncated instead of
//! re-indented, only the first fragment of each list is shown, and the
//! response format asks for three fields instead of four.

use tracing::debug;

use crate::types::{FragmentInput, SimilarCodeMatch};

/// Hard cap on embedded code length, in characters.
const CODE_CAP: usize = 400;
/// Caps applied to prior review replies when summarizing.
const STYLE_REPLY_CAP: usize = 80;
const DUP_REPLY_CAP: usize = 50;

/// Stateless builder for the minimal prompt set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalPromptGenerator;

impl MinimalPromptGenerator {
    /// Trim and hard-truncate a code block. No indentation normalization.
    fn clean_code(code: &str) -> String {
        truncate_chars(code.trim(), CODE_CAP).to_string()
    }

    /// Build the review prompt from the first added and first deleted
    /// fragment; the rest of each list is ignored on purpose.
    pub fn review_prompt(
        &self,
        added_code: &[FragmentInput],
        deleted_code: &[FragmentInput],
        function_name: &str,
    ) -> String {
        let added_text = added_code.first().map(FragmentInput::code).unwrap_or("");
        let deleted_text = deleted_code.first().map(FragmentInput::code).unwrap_or("");
        debug!(
            added = !added_text.is_empty(),
            deleted = !deleted_text.is_empty(),
            "minimal review_prompt"
        );

        let mut prompt = format!(
            "Code review for function `{function_name}`. Answer in EXACT format below.\n\n"
        );

        if !added_text.is_empty() {
            prompt.push_str(&format!(
                "NEW CODE:\n```python\n{}\n```\n",
                Self::clean_code(added_text)
            ));
        }
        if !deleted_text.is_empty() {
            prompt.push_str(&format!(
                "REMOVED CODE:\n```python\n{}\n```\n",
                Self::clean_code(deleted_text)
            ));
        }

        prompt.push_str(
            r#"
Format your response EXACTLY like this:

ISSUES: [List problems or "None"]
APPROVE: [Yes/No]
REASON: [One sentence]

No other text allowed."#,
        );

        prompt
    }

    /// Build the duplication comparison against the top match.
    ///
    /// With no matches there is nothing to ask the model, so this returns a
    /// canned negative answer in the expected response format instead.
    pub fn duplication_prompt(
        &self,
        code_snippet: &str,
        similar_codes: &[SimilarCodeMatch],
    ) -> String {
        let Some(most_similar) = similar_codes.first() else {
            debug!("minimal duplication_prompt: no matches, canned answer");
            return "No similar code found.\n\nDUPLICATE: No\nACTION: None needed".to_string();
        };

        format!(
            r#"Compare these code blocks:

CODE A:
```python
{a}
```

CODE B:
```python
{b}
```

Response format:
DUPLICATE: [Yes/No]
ACTION: [Combine/Keep separate/Review needed]"#,
            a = Self::clean_code(code_snippet),
            b = Self::clean_code(&most_similar.code),
        )
    }

    /// Build the final decision prompt from the two earlier replies.
    ///
    /// No colon-aware extraction here: known label tokens are stripped
    /// verbatim and the remainder is hard-truncated before embedding.
    pub fn summary_prompt(&self, style_result: &str, duplication_result: &str) -> String {
        let style_clean = style_result
            .replace("ISSUES:", "")
            .replace("APPROVE:", "")
            .replace("REASON:", "");
        let style_clean = truncate_chars(&style_clean, STYLE_REPLY_CAP);

        let dup_clean = duplication_result
            .replace("DUPLICATE:", "")
            .replace("ACTION:", "");
        let dup_clean = truncate_chars(&dup_clean, DUP_REPLY_CAP);

        format!(
            r#"Make final decision about this code change:

What the style review found: {style_clean}
What the duplication check found: {dup_clean}

Should this code change be merged?

DECISION: [APPROVE/REJECT]
REASON: [One sentence about the CODE QUALITY]

Do not comment on the review process itself."#
        )
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((offset, _)) => &s[..offset],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CodeFragment;

    fn frag(code: &str) -> FragmentInput {
        CodeFragment {
            start_line: 0,
            end_line: 0,
            code: code.to_string(),
            line_count: 0,
        }
        .into()
    }

    #[test]
    fn clean_code_trims_then_caps_at_400_chars() {
        let long = format!("  {}  ", "x".repeat(500));
        let cleaned = MinimalPromptGenerator::clean_code(&long);
        assert_eq!(cleaned.chars().count(), 400);
        assert_eq!(cleaned, "x".repeat(400));
    }

    #[test]
    fn truncation_is_char_boundary_safe() {
        let s = "é".repeat(10);
        assert_eq!(truncate_chars(&s, 3), "ééé");
        assert_eq!(truncate_chars("short", 400), "short");
    }

    #[test]
    fn review_prompt_uses_only_first_fragments() {
        let g = MinimalPromptGenerator;
        let prompt = g.review_prompt(
            &[frag("first_add()"), frag("second_add()")],
            &[frag("first_del()"), frag("second_del()")],
            "f",
        );

        assert!(prompt.contains("Code review for function `f`."));
        assert!(prompt.contains("NEW CODE:\n```python\nfirst_add()\n```"));
        assert!(prompt.contains("REMOVED CODE:\n```python\nfirst_del()\n```"));
        assert!(!prompt.contains("second_add"));
        assert!(!prompt.contains("second_del"));
        for field in ["ISSUES:", "APPROVE:", "REASON:"] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn review_prompt_omits_empty_sections() {
        let g = MinimalPromptGenerator;
        let prompt = g.review_prompt(&[frag("a()")], &[], "f");
        assert!(prompt.contains("NEW CODE:"));
        assert!(!prompt.contains("REMOVED CODE:"));
    }

    #[test]
    fn duplication_prompt_canned_answer_without_matches() {
        let g = MinimalPromptGenerator;
        assert_eq!(
            g.duplication_prompt("x = 1", &[]),
            "No similar code found.\n\nDUPLICATE: No\nACTION: None needed"
        );
    }

    #[test]
    fn duplication_prompt_compares_against_top_match() {
        let g = MinimalPromptGenerator;
        let matches = vec![
            SimilarCodeMatch {
                file: Some("a.py".to_string()),
                code: "top()".to_string(),
                similarity: Some(95.0),
            },
            SimilarCodeMatch {
                file: Some("b.py".to_string()),
                code: "second()".to_string(),
                similarity: Some(60.0),
            },
        ];
        let prompt = g.duplication_prompt("mine()", &matches);

        assert!(prompt.contains("CODE A:\n```python\nmine()\n```"));
        assert!(prompt.contains("CODE B:\n```python\ntop()\n```"));
        assert!(!prompt.contains("second"));
        assert!(prompt.contains("DUPLICATE: [Yes/No]"));
    }

    #[test]
    fn summary_prompt_strips_labels_and_caps_lengths() {
        let g = MinimalPromptGenerator;
        let style = format!("ISSUES: {}", "a".repeat(200));
        let dup = format!("DUPLICATE: {}", "b".repeat(100));
        let prompt = g.summary_prompt(&style, &dup);

        // Labels removed, remainder capped at 80/50 chars.
        assert!(prompt.contains(&format!(
            "What the style review found:  {}",
            "a".repeat(79)
        )));
        assert!(prompt.contains(&format!(
            "What the duplication check found:  {}",
            "b".repeat(49)
        )));
        assert!(!prompt.contains("ISSUES:"));
        assert!(!prompt.contains("DUPLICATE: b"));
        assert!(prompt.contains("DECISION: [APPROVE/REJECT]"));
    }
}
