//! Editable prompt text and the immutable snapshot taken at dispatch.

use std::sync::Arc;

use crate::drafts::{DraftStore, SYSTEM_PROMPT_KEY, USER_PROMPT_KEY};
use crate::llm::Message;

/// Prompt fields as edited by the user. Owned by the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub system_prompt: String,
    pub user_prompt: String,
}

impl PromptState {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self { system_prompt: system_prompt.into(), user_prompt: user_prompt.into() }
    }

    /// Load saved drafts. Missing keys read as empty.
    pub fn restore(store: &dyn DraftStore) -> Self {
        Self {
            system_prompt: store.get(SYSTEM_PROMPT_KEY).unwrap_or_default(),
            user_prompt: store.get(USER_PROMPT_KEY).unwrap_or_default(),
        }
    }

    /// Save both fields. Best-effort; the store logs its own failures.
    pub fn persist(&self, store: &dyn DraftStore) {
        store.set(SYSTEM_PROMPT_KEY, &self.system_prompt);
        store.set(USER_PROMPT_KEY, &self.user_prompt);
    }

    /// Capture the current text for a dispatch.
    #[must_use]
    pub fn snapshot(&self) -> PromptSnapshot {
        PromptSnapshot { system_prompt: Arc::from(self.system_prompt.as_str()), user_prompt: Arc::from(self.user_prompt.as_str()) }
    }
}

/// Immutable copy of the prompt taken at dispatch time. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSnapshot {
    system_prompt: Arc<str>,
    user_prompt: Arc<str>,
}

impl PromptSnapshot {
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    #[must_use]
    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    /// Normalized message list: a system message only when the system prompt
    /// is non-empty, then the user message (sent even when empty).
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(Message::system(&*self.system_prompt));
        }
        messages.push(Message::user(&*self.user_prompt));
        messages
    }
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
