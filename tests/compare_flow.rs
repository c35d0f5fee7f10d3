//! End-to-end: drafts -> dispatch both providers -> diff -> render -> copy.

use std::sync::Arc;

use async_trait::async_trait;
use promptdiff::clipboard::{Osc52Clipboard, osc52_sequence};
use promptdiff::drafts::{DraftStore, FileDraftStore};
use promptdiff::llm::{Completion, Message, ProviderError};
use promptdiff::render::{Style, render_panel};
use promptdiff::{ComparisonSession, PromptState, Provider, RequestState};

struct Echo(&'static str);

#[async_trait]
impl Completion for Echo {
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or_default();
        Ok(format!("{prompt} {}", self.0))
    }
}

struct Down;

#[async_trait]
impl Completion for Down {
    async fn complete(&self, _messages: &[Message]) -> Result<String, ProviderError> {
        Err(ProviderError::Api { status: 503, body: "overloaded".into() })
    }
}

#[tokio::test]
async fn compare_both_providers_from_saved_drafts() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileDraftStore::new(dir.path().join("drafts.json"));
    PromptState::new("be brief", "name a color").persist(&store);

    let prompt = PromptState::restore(&store);
    assert_eq!(prompt.system_prompt, "be brief");
    assert_eq!(prompt.user_prompt, "name a color");

    let session = ComparisonSession::new(Arc::new(Echo("blue")), Arc::new(Down));
    for (_, handle) in session.dispatch_both(&prompt.snapshot()) {
        handle.await.unwrap();
    }

    assert_eq!(session.state(Provider::OpenAi), RequestState::Succeeded("name a color blue".into()));
    let failure = session.state(Provider::Anthropic).failure().cloned().unwrap();
    assert_eq!(failure.code, "E_API_RESPONSE");
    assert!(failure.retryable);

    let openai = render_panel(&session.view(Provider::OpenAi), Style::Plain);
    assert_eq!(openai, "OpenAI Response: +1 -0 =3 words\nname a color{+ blue+}\n");

    let claude = render_panel(&session.view(Provider::Anthropic), Style::Plain);
    assert!(claude.starts_with("Claude Response: failed [E_API_RESPONSE]"));
    assert_eq!(claude.lines().count(), 1);

    let clipboard = Osc52Clipboard::new(Vec::new());
    assert!(session.copy_response(Provider::OpenAi, &clipboard).unwrap());
    assert!(!session.copy_response(Provider::Anthropic, &clipboard).unwrap());
    let written = String::from_utf8(clipboard.into_inner()).unwrap();
    assert_eq!(written, osc52_sequence("name a color blue"));

    assert_eq!(store.get("userPrompt").as_deref(), Some("name a color"));
}
