//! Prompt construction for LLM-assisted code review.
//!
//! This crate is the templating layer between a diff-producing caller and a
//! model client (both out of scope here): it turns structured added/deleted
//! code chunks plus optional full-function context into plain-text prompts,
//! and re-parses the model's free-form replies to feed a final summary
//! prompt.
//!
//! Flow for one reviewed function:
//! 1) **Style review** — normalized change fragments, optional function
//!    context, strict four-field response format;
//! 2) **Duplication check** — the reviewed snippet against the single best
//!    similarity match;
//! 3) **Summary** — labeled fields pulled back out of the two replies and
//!    embedded into a final decision prompt.
//!
//! Two builders cover the same flow at different verbosity:
//! [`full::FullPromptGenerator`] for general chat models and
//! [`minimal::MinimalPromptGenerator`] for small coder models that drift on
//! long instructions. [`select::PromptGenerator`] picks one by model name
//! and dispatches over the pair (plain enum dispatch, no `Box<dyn ...>`).
//!
//! Everything is a pure function of its arguments: no I/O, no shared state,
//! and no fallible operations — malformed input degrades to omitted
//! sections or sentinel values instead of errors. Diagnostics go through
//! `tracing` at `DEBUG`/`TRACE`.

pub mod clean;
pub mod extract;
pub mod full;
pub mod minimal;
pub mod select;
pub mod types;

pub use clean::normalize_block;
pub use extract::{NO_ISSUES, extract_field};
pub use full::FullPromptGenerator;
pub use minimal::MinimalPromptGenerator;
pub use select::PromptGenerator;
pub use types::{CodeFragment, FragmentInput, ReviewPayload, SimilarCodeMatch};
