//! Ask two LLM providers the same prompt and word-diff each answer against it.

pub mod clipboard;
pub mod diff;
pub mod drafts;
pub mod error;
pub mod llm;
pub mod provider;
pub mod render;
pub mod session;

pub use diff::{DiffSegment, SegmentKind, WordDiff, diff_words};
pub use provider::Provider;
pub use session::{ComparisonSession, PromptSnapshot, PromptState, RequestState, ResponseView};
