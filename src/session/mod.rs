//! Comparison session: two independent request lifecycles over one prompt.
//!
//! DESIGN
//! ======
//! One slot per provider. Each slot owns its completion function, its
//! `RequestState`, and its own mutex; nothing is shared between the two, so
//! a slow or failing provider cannot block or touch the other. Locks are held
//! only for synchronous state transitions, never across an `.await`.
//!
//! STALE RESULTS
//! =============
//! There is no cancellation. Every dispatch takes the next sequence number
//! for its provider, and a completion is applied only if its number is still
//! the latest. Results of superseded dispatches are dropped.
//!
//! No retries: a failure stays `Failed` until the caller dispatches again.

pub mod prompt;
pub mod request;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clipboard::{Clipboard, ClipboardError};
use crate::diff::{WordDiff, diff_words};
use crate::error::{ErrorCode, FailureInfo};
use crate::llm::config::ComparisonConfig;
use crate::llm::{Completion, ProviderError, completion_for};
use crate::provider::Provider;
pub use prompt::{PromptSnapshot, PromptState};
pub use request::RequestState;

// =============================================================================
// SLOTS
// =============================================================================

struct ProviderSlot {
    provider: Provider,
    completion: Arc<dyn Completion>,
    state: Mutex<SlotState>,
}

#[derive(Default)]
struct SlotState {
    request: RequestState,
    latest_seq: u64,
    /// Snapshot of the latest dispatch; the baseline for its diff.
    snapshot: Option<PromptSnapshot>,
}

impl ProviderSlot {
    fn new(provider: Provider, completion: Arc<dyn Completion>) -> Self {
        Self { provider, completion, state: Mutex::new(SlotState::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a completion result if `seq` is still the latest dispatch.
    fn settle(&self, seq: u64, result: Result<String, ProviderError>) {
        let provider = self.provider;
        let mut state = self.lock();
        if state.latest_seq != seq {
            debug!(
                %provider,
                seq,
                latest = state.latest_seq,
                current = state.request.label(),
                "session: discarding stale result"
            );
            return;
        }
        state.request = match result {
            Ok(text) => {
                info!(%provider, seq, response_len = text.len(), "session: response received");
                RequestState::Succeeded(text)
            }
            Err(e) => {
                warn!(%provider, seq, code = e.error_code(), retryable = e.retryable(), error = %e, "session: request failed");
                RequestState::Failed(FailureInfo::from_error(&e))
            }
        };
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// What the rendering layer needs for one provider panel.
#[derive(Debug, Clone)]
pub struct ResponseView {
    pub provider: Provider,
    pub state: RequestState,
    /// Diff of the response against the dispatched user prompt; `None`
    /// unless the request succeeded.
    pub diff: Option<WordDiff>,
}

// =============================================================================
// SESSION
// =============================================================================

/// Owns both provider slots. Spawned requests hold their own `Arc` to the
/// slot they write.
pub struct ComparisonSession {
    slots: [Arc<ProviderSlot>; 2],
}

impl ComparisonSession {
    pub fn new(openai: Arc<dyn Completion>, anthropic: Arc<dyn Completion>) -> Self {
        Self {
            slots: [
                Arc::new(ProviderSlot::new(Provider::OpenAi, openai)),
                Arc::new(ProviderSlot::new(Provider::Anthropic, anthropic)),
            ],
        }
    }

    /// Build both provider clients from config. A provider without an API
    /// key still gets a slot; its requests fail with `E_MISSING_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to build.
    pub fn from_config(config: &ComparisonConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(completion_for(config, Provider::OpenAi)?, completion_for(config, Provider::Anthropic)?))
    }

    fn slot(&self, provider: Provider) -> &Arc<ProviderSlot> {
        &self.slots[provider.index()]
    }

    /// Start a request to `provider` with `snapshot`.
    ///
    /// The slot is `Pending` when this returns. A dispatch while one is
    /// already pending is allowed; the older result will be discarded.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch(&self, provider: Provider, snapshot: PromptSnapshot) -> JoinHandle<()> {
        let slot = Arc::clone(self.slot(provider));
        let (seq, previous) = {
            let mut state = slot.lock();
            let previous = state.request.label();
            state.latest_seq += 1;
            state.request = RequestState::Pending;
            state.snapshot = Some(snapshot.clone());
            (state.latest_seq, previous)
        };
        info!(
            %provider,
            seq,
            previous,
            system_len = snapshot.system_prompt().len(),
            prompt_len = snapshot.user_prompt().len(),
            "session: dispatch"
        );

        tokio::spawn(async move {
            let messages = snapshot.messages();
            let result = slot.completion.complete(&messages).await;
            slot.settle(seq, result);
        })
    }

    /// Dispatch the same snapshot to both providers. Handles are ordered as
    /// [`Provider::ALL`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch_both(&self, snapshot: &PromptSnapshot) -> [(Provider, JoinHandle<()>); 2] {
        Provider::ALL.map(|provider| (provider, self.dispatch(provider, snapshot.clone())))
    }

    #[must_use]
    pub fn state(&self, provider: Provider) -> RequestState {
        self.slot(provider).lock().request.clone()
    }

    #[must_use]
    pub fn is_pending(&self, provider: Provider) -> bool {
        self.slot(provider).lock().request.is_pending()
    }

    /// Current state plus, when succeeded, a fresh diff against the user
    /// prompt the request was dispatched with.
    #[must_use]
    pub fn view(&self, provider: Provider) -> ResponseView {
        let (state, baseline) = {
            let slot = self.slot(provider).lock();
            let baseline = slot
                .snapshot
                .as_ref()
                .map(|s| s.user_prompt().to_owned())
                .unwrap_or_default();
            (slot.request.clone(), baseline)
        };
        let diff = state.result_text().map(|text| diff_words(&baseline, text));
        ResponseView { provider, state, diff }
    }

    /// Copy a succeeded response to `clipboard`. Returns `Ok(false)` when
    /// there is no response to copy.
    ///
    /// # Errors
    ///
    /// Returns the clipboard's error if the write fails.
    pub fn copy_response(&self, provider: Provider, clipboard: &dyn Clipboard) -> Result<bool, ClipboardError> {
        let Some(text) = self.state(provider).result_text().map(str::to_owned) else {
            return Ok(false);
        };
        clipboard.copy(&text)?;
        info!(%provider, len = text.len(), "session: response copied");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
