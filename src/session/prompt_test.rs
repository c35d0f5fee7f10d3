use super::*;
use crate::drafts::MemoryDraftStore;
use crate::llm::Role;

#[test]
fn messages_include_system_when_present() {
    let snapshot = PromptState::new("be terse", "hello").snapshot();
    let messages = snapshot.messages();
    assert_eq!(messages, vec![Message::system("be terse"), Message::user("hello")]);
}

#[test]
fn messages_skip_empty_system() {
    let snapshot = PromptState::new("", "hello").snapshot();
    let messages = snapshot.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
}

#[test]
fn empty_user_prompt_is_still_sent() {
    let snapshot = PromptState::default().snapshot();
    assert_eq!(snapshot.messages(), vec![Message::user("")]);
}

#[test]
fn snapshot_is_insulated_from_later_edits() {
    let mut prompt = PromptState::new("sys", "first");
    let snapshot = prompt.snapshot();
    prompt.user_prompt.push_str(" edited");
    prompt.system_prompt.clear();
    assert_eq!(snapshot.user_prompt(), "first");
    assert_eq!(snapshot.system_prompt(), "sys");
}

#[test]
fn restore_missing_drafts_is_empty() {
    let store = MemoryDraftStore::new();
    assert_eq!(PromptState::restore(&store), PromptState::default());
}

#[test]
fn persist_then_restore() {
    let store = MemoryDraftStore::new();
    let prompt = PromptState::new("sys", "user text");
    prompt.persist(&store);
    assert_eq!(PromptState::restore(&store), prompt);
}
