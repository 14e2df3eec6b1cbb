//! Verbose prompt builder used for general-purpose chat models.
//!
//! Every method is a pure function of its arguments. Templates pin the model
//! to an exact labeled response format so the replies survive the crude
//! field extraction in [`crate::extract`].

use tracing::debug;

use crate::clean::normalize_block;
use crate::extract::extract_field;
use crate::types::{FragmentInput, ReviewPayload, SimilarCodeMatch};

/// Stateless builder for the full (verbose) prompt set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullPromptGenerator;

impl FullPromptGenerator {
    /// Build the style/correctness review prompt for a function-level change.
    ///
    /// Fragments that normalize to nothing are dropped. The context section
    /// appears only when `full_function_code` is non-empty and there is at
    /// least one surviving fragment; deletions-only changes present the
    /// function as its post-removal state.
    pub fn style_review_prompt(
        &self,
        added_code: &[FragmentInput],
        deleted_code: &[FragmentInput],
        full_function_code: &str,
        function_name: &str,
    ) -> String {
        let added_blocks = fence_fragments(added_code);
        let deleted_blocks = fence_fragments(deleted_code);

        let has_additions = !added_blocks.is_empty();
        let has_deletions = !deleted_blocks.is_empty();
        debug!(
            added = added_blocks.len(),
            deleted = deleted_blocks.len(),
            "style_review_prompt: surviving blocks"
        );

        let mut context_section = String::new();
        if !full_function_code.is_empty() {
            let clean_full = normalize_block(full_function_code);
            if has_deletions && !has_additions {
                context_section = format!(
                    "Current function `{function_name}` (after removal):\n```python\n{clean_full}\n```\n"
                );
            } else if has_additions {
                context_section =
                    format!("Full function `{function_name}`:\n```python\n{clean_full}\n```\n");
            }
        }

        let mut changes_section = String::new();
        if has_additions {
            changes_section.push_str(&format!("### ADDED:\n{}\n", added_blocks.join("\n")));
        }
        if has_deletions {
            if !has_additions {
                changes_section.push_str(&format!(
                    "### REMOVED (these lines were deleted from the function above):\n{}\n",
                    deleted_blocks.join("\n")
                ));
            } else {
                changes_section.push_str(&format!("### REMOVED:\n{}\n", deleted_blocks.join("\n")));
            }
        }
        if changes_section.is_empty() {
            changes_section.push_str("No code changes detected.\n");
        }

        let instruction_context = if has_deletions && !has_additions {
            " The function shown above is the current state after the removal."
        } else {
            ""
        };

        let prompt = format!(
            r#"### Instruction:
You are a code reviewer. Analyze this Python code change and respond EXACTLY in the format below.{instruction_context}

{context_section}{changes_section}
### Response:
SUMMARY: [One sentence describing what changed]
ISSUES: [List specific bugs/problems, or write "None found"]
IMPROVEMENTS: [Suggest specific improvements, or write "None needed"]
DECISION: [Yes/No] - [One sentence reason]"#
        );

        prompt.trim().to_string()
    }

    /// Build the duplication check prompt against the single best match.
    ///
    /// Returns `""` when the snippet is blank or there are no matches; that
    /// is a "nothing to check" signal, not an error.
    pub fn duplication_check_prompt(
        &self,
        code_snippet: &str,
        similar_codes: &[SimilarCodeMatch],
        function_name: &str,
    ) -> String {
        if code_snippet.trim().is_empty() || similar_codes.is_empty() {
            debug!("duplication_check_prompt: nothing to check");
            return String::new();
        }

        let clean_snippet = normalize_block(code_snippet);

        // Only use the most similar code to avoid confusing the model.
        let most_similar = &similar_codes[0];
        let file_path = most_similar.file_label();
        let similarity = most_similar.similarity_label();
        let clean_similar = normalize_block(&most_similar.code);

        let prompt = format!(
            r#"Check for code duplication. Respond EXACTLY in the format below.

Current code from `{function_name}`:
```python
{clean_snippet}
```

Similar code from `{file_path}` ({similarity}% similar):
```python
{clean_similar}
```

You MUST respond in this EXACT format:

DUPLICATION LEVEL: [None/Low/Medium/High]

ANALYSIS: [Are these actual duplicates? One sentence.]

RECOMMENDATION: [What action to take? One sentence.]

Do not add extra text."#
        );

        prompt.trim().to_string()
    }

    /// Build the final decision prompt from the two earlier review replies.
    ///
    /// Pulls ISSUES and DECISION out of the style reply and DUPLICATION LEVEL
    /// out of the duplication reply; unparseable replies degrade to the
    /// extraction sentinel rather than failing.
    pub fn summary_prompt(
        &self,
        style_result: &str,
        duplication_result: &str,
        function_name: &str,
    ) -> String {
        let style_issues = extract_field(style_result, "ISSUES");
        let style_decision = extract_field(style_result, "DECISION");
        let dup_level = extract_field(duplication_result, "DUPLICATION LEVEL");

        let prompt = format!(
            r#"Based on these code review results for function `{function_name}`, make a final decision:

STYLE REVIEW FOUND: {style_issues}
STYLE DECISION: {style_decision}
DUPLICATION LEVEL: {dup_level}

Your job: Decide if this code change should be approved based on the findings above.

Response format:
ISSUES FOUND: [Summarize actual problems found, or "None"]

PRIORITY: [High/Medium/Low]

RECOMMENDATION: [Approve/Request Changes/Needs Discussion]

REASON: [Why you made this recommendation]

Focus on the CODE QUALITY, not the review format."#
        );

        prompt.trim().to_string()
    }

    /// Convenience wrapper: build the style review prompt from a bundled
    /// payload (as delivered by the diff-producing caller).
    pub fn contextual_review_prompt(&self, payload: &ReviewPayload) -> String {
        self.style_review_prompt(
            &payload.added_code,
            &payload.deleted_code,
            &payload.full_function_code,
            &payload.function_name,
        )
    }
}

/// Normalize each fragment's code and fence the non-empty survivors.
fn fence_fragments(fragments: &[FragmentInput]) -> Vec<String> {
    fragments
        .iter()
        .map(|fragment| normalize_block(fragment.code()))
        .filter(|clean| !clean.is_empty())
        .map(|clean| format!("```python\n{clean}\n```"))
        .collect()
}
