//! Input data model for prompt building.
//!
//! Callers (typically a diff splitter plus an embedding search) hand code over
//! either as typed records or as raw JSON mappings. Both shapes are resolved
//! into one canonical accessor at ingestion, so the builders never re-check
//! the input shape at each call site.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chunk of changed source text with its line bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeFragment {
    /// First line of the chunk in the source file (0-based).
    pub start_line: u32,
    /// Last line of the chunk (inclusive, `>= start_line`).
    pub end_line: u32,
    /// Raw chunk text as it appeared in the diff.
    pub code: String,
    /// Informational; not required to equal `end_line - start_line + 1`.
    pub line_count: u32,
}

/// A fragment as supplied by the caller: a typed record or a raw mapping.
///
/// Untagged, so a JSON payload carrying either shape deserializes directly.
/// A raw mapping without a `code` key (or with a non-string value) degrades
/// to the empty string, never an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FragmentInput {
    Structured(CodeFragment),
    Raw(Map<String, Value>),
}

impl FragmentInput {
    /// Resolve the fragment's code text.
    pub fn code(&self) -> &str {
        match self {
            Self::Structured(f) => &f.code,
            Self::Raw(map) => map.get("code").and_then(Value::as_str).unwrap_or(""),
        }
    }
}

impl From<CodeFragment> for FragmentInput {
    fn from(fragment: CodeFragment) -> Self {
        Self::Structured(fragment)
    }
}

/// An excerpt from another file ranked by similarity to the reviewed code.
///
/// Lists of matches are expected highest-similarity-first; only the first
/// entry is ever consulted by the builders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarCodeMatch {
    /// Repo-relative path of the file the excerpt came from.
    #[serde(default)]
    pub file: Option<String>,
    /// Excerpt text.
    #[serde(default)]
    pub code: String,
    /// Similarity score in percent, when the search reported one.
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl SimilarCodeMatch {
    /// Path to render into the prompt; unknown origins get a fixed placeholder.
    pub(crate) fn file_label(&self) -> &str {
        self.file.as_deref().unwrap_or("unknown_file")
    }

    /// Score to render into the prompt; missing scores render as `N/A`.
    /// Integral scores keep their decimal point (`91.0`, not `91`).
    pub(crate) fn similarity_label(&self) -> String {
        match self.similarity {
            Some(score) => format!("{score:?}"),
            None => "N/A".to_string(),
        }
    }
}

/// Everything known about a single function-level change, bundled for the
/// contextual review entry point. All fields default, so a sparse JSON
/// payload is fine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPayload {
    #[serde(default)]
    pub added_code: Vec<FragmentInput>,
    #[serde(default)]
    pub deleted_code: Vec<FragmentInput>,
    #[serde(default)]
    pub full_function_code: String,
    #[serde(default)]
    pub function_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_input_resolves_both_shapes() {
        let structured: FragmentInput = CodeFragment {
            start_line: 3,
            end_line: 4,
            code: "let x = 1;".to_string(),
            line_count: 2,
        }
        .into();
        assert_eq!(structured.code(), "let x = 1;");

        let raw: FragmentInput =
            serde_json::from_value(serde_json::json!({ "code": "let y = 2;" })).unwrap();
        assert_eq!(raw.code(), "let y = 2;");
        assert!(matches!(raw, FragmentInput::Raw(_)));
    }

    #[test]
    fn raw_mapping_without_code_key_degrades_to_empty() {
        let raw: FragmentInput =
            serde_json::from_value(serde_json::json!({ "note": "no code here" })).unwrap();
        assert_eq!(raw.code(), "");
    }

    #[test]
    fn untagged_deserialization_prefers_structured_shape() {
        let input: FragmentInput = serde_json::from_value(serde_json::json!({
            "start_line": 0,
            "end_line": 1,
            "code": "pass",
            "line_count": 2
        }))
        .unwrap();
        assert!(matches!(input, FragmentInput::Structured(_)));
    }

    #[test]
    fn similar_match_labels_default_sensibly() {
        let m = SimilarCodeMatch::default();
        assert_eq!(m.file_label(), "unknown_file");
        assert_eq!(m.similarity_label(), "N/A");

        let m = SimilarCodeMatch {
            file: Some("src/util.py".to_string()),
            code: String::new(),
            similarity: Some(87.5),
        };
        assert_eq!(m.file_label(), "src/util.py");
        assert_eq!(m.similarity_label(), "87.5");
    }

    #[test]
    fn integral_similarity_keeps_its_decimal_point() {
        let m = SimilarCodeMatch {
            file: None,
            code: String::new(),
            similarity: Some(91.0),
        };
        assert_eq!(m.similarity_label(), "91.0");
    }

    #[test]
    fn sparse_payload_fills_defaults() {
        let payload: ReviewPayload =
            serde_json::from_value(serde_json::json!({ "function_name": "f" })).unwrap();
        assert!(payload.added_code.is_empty());
        assert!(payload.deleted_code.is_empty());
        assert_eq!(payload.full_function_code, "");
        assert_eq!(payload.function_name, "f");
    }
}
