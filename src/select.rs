//! Model-aware generator selection.
//!
//! Enum dispatch over the two builders (no `Box<dyn ...>`): small coder
//! models get the minimal prompt set, everything else the full one. The
//! dispatching methods give callers one surface regardless of which variant
//! was picked; the minimal variant simply ignores inputs it has no use for.

use tracing::debug;

use crate::full::FullPromptGenerator;
use crate::minimal::MinimalPromptGenerator;
use crate::types::{ReviewPayload, SimilarCodeMatch};

/// A prompt builder chosen for a specific model.
#[derive(Debug, Clone, Copy)]
pub enum PromptGenerator {
    Full(FullPromptGenerator),
    Minimal(MinimalPromptGenerator),
}

impl PromptGenerator {
    /// Pick the builder for a model name.
    ///
    /// Case-insensitive substring match: names containing `deepseek` or
    /// `coder` get the minimal set, everything else the full set.
    pub fn for_model(model_name: &str) -> Self {
        let lower = model_name.to_lowercase();
        if lower.contains("deepseek") || lower.contains("coder") {
            debug!(model = model_name, "selected minimal prompt generator");
            Self::Minimal(MinimalPromptGenerator)
        } else {
            debug!(model = model_name, "selected full prompt generator");
            Self::Full(FullPromptGenerator)
        }
    }

    pub fn is_minimal(&self) -> bool {
        matches!(self, Self::Minimal(_))
    }

    /// Build the review prompt for a change payload.
    ///
    /// The minimal variant ignores `full_function_code` and everything past
    /// the first fragment of each list.
    pub fn review_prompt(&self, payload: &ReviewPayload) -> String {
        match self {
            Self::Full(g) => g.contextual_review_prompt(payload),
            Self::Minimal(g) => g.review_prompt(
                &payload.added_code,
                &payload.deleted_code,
                &payload.function_name,
            ),
        }
    }

    /// Build the duplication prompt against the top similarity match.
    pub fn duplication_prompt(
        &self,
        code_snippet: &str,
        similar_codes: &[SimilarCodeMatch],
        function_name: &str,
    ) -> String {
        match self {
            Self::Full(g) => g.duplication_check_prompt(code_snippet, similar_codes, function_name),
            Self::Minimal(g) => g.duplication_prompt(code_snippet, similar_codes),
        }
    }

    /// Build the final decision prompt from the two earlier replies.
    pub fn summary_prompt(
        &self,
        style_result: &str,
        duplication_result: &str,
        function_name: &str,
    ) -> String {
        match self {
            Self::Full(g) => g.summary_prompt(style_result, duplication_result, function_name),
            Self::Minimal(g) => g.summary_prompt(style_result, duplication_result),
        }
    }
}
