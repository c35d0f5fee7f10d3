use super::*;

// ===== request building =====

#[test]
fn cc_messages_keep_system_first() {
    let messages = vec![Message::system("be terse"), Message::user("hello")];
    let msgs = build_chat_completions_messages(&messages);
    let body = serde_json::to_value(CcRequest { model: "gpt-4", max_tokens: 1000, messages: &msgs }).unwrap();
    assert_eq!(
        body["messages"],
        serde_json::json!([
            { "role": "system", "content": "be terse" },
            { "role": "user", "content": "hello" }
        ])
    );
}

#[test]
fn resp_request_moves_system_to_instructions() {
    let messages = vec![Message::system("be terse"), Message::user("hello")];
    let (system, rest) = split_system(&messages);
    let input = build_responses_input(rest);
    let body = serde_json::to_value(RespRequest {
        model: "gpt-4o",
        max_output_tokens: 100,
        instructions: system,
        input: &input,
    })
    .unwrap();
    assert_eq!(body["instructions"], "be terse");
    assert_eq!(body["input"].as_array().unwrap().len(), 1);
    assert_eq!(body["input"][0]["role"], "user");
    assert_eq!(body["input"][0]["content"][0], serde_json::json!({ "type": "input_text", "text": "hello" }));
}

#[test]
fn resp_request_without_instructions() {
    let body = serde_json::to_value(RespRequest { model: "gpt-4o", max_output_tokens: 100, instructions: None, input: &[] })
        .unwrap();
    assert!(body.get("instructions").is_none());
}

// ===== chat completions =====

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    assert_eq!(parse_chat_completions_response(&json).unwrap(), "Hello!");
}

#[test]
fn cc_parse_null_content_is_empty() {
    let json = serde_json::json!({
        "model": "gpt-4",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": null } }]
    })
    .to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(ProviderError::EmptyResponse)));
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(ProviderError::Malformed(_))));
}

#[test]
fn cc_parse_invalid_json() {
    assert!(matches!(parse_chat_completions_response("{"), Err(ProviderError::Malformed(_))));
}

// ===== responses API =====

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [{
            "type": "message",
            "content": [{ "type": "output_text", "text": "Done!" }]
        }],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    assert_eq!(parse_responses_response(&json).unwrap(), "Done!");
}

#[test]
fn resp_parse_skips_non_message_items() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [
            { "type": "reasoning", "summary": [] },
            { "type": "message", "content": [
                { "type": "output_text", "text": "Part one. " },
                { "type": "output_text", "text": "Part two." }
            ] }
        ]
    })
    .to_string();
    assert_eq!(parse_responses_response(&json).unwrap(), "Part one. Part two.");
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output_text": "Fallback text",
        "usage": { "input_tokens": 5, "output_tokens": 3 }
    })
    .to_string();
    assert_eq!(parse_responses_response(&json).unwrap(), "Fallback text");
}

#[test]
fn resp_parse_no_text_is_empty() {
    let json = serde_json::json!({ "model": "gpt-4o", "output": [] }).to_string();
    assert!(matches!(parse_responses_response(&json), Err(ProviderError::EmptyResponse)));
}
