use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_without_any_vars() {
    let cfg = ComparisonConfig::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(cfg.openai.provider, Provider::OpenAi);
    assert_eq!(cfg.openai.api_key, None);
    assert_eq!(cfg.openai.model, DEFAULT_OPENAI_MODEL);
    assert_eq!(cfg.openai.base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(cfg.openai.openai_mode, OpenAiApiMode::ChatCompletions);

    assert_eq!(cfg.anthropic.provider, Provider::Anthropic);
    assert_eq!(cfg.anthropic.key_var, "ANTHROPIC_API_KEY");
    assert_eq!(cfg.anthropic.model, DEFAULT_ANTHROPIC_MODEL);
    assert_eq!(cfg.anthropic.base_url, DEFAULT_ANTHROPIC_BASE_URL);
    assert_eq!(cfg.anthropic.max_tokens, DEFAULT_MAX_TOKENS);
    assert_eq!(
        cfg.anthropic.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn parses_overrides() {
    let cfg = ComparisonConfig::from_lookup(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("ANTHROPIC_API_KEY", "ak-test"),
        ("PROMPTDIFF_OPENAI_MODEL", "gpt-4o"),
        ("PROMPTDIFF_ANTHROPIC_MODEL", "claude-sonnet-4-5"),
        ("PROMPTDIFF_OPENAI_MODE", "responses"),
        ("PROMPTDIFF_OPENAI_BASE_URL", "https://example.test/v1/"),
        ("PROMPTDIFF_MAX_TOKENS", "256"),
        ("PROMPTDIFF_REQUEST_TIMEOUT_SECS", "42"),
        ("PROMPTDIFF_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();

    assert_eq!(cfg.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(cfg.anthropic.api_key.as_deref(), Some("ak-test"));
    assert_eq!(cfg.openai.model, "gpt-4o");
    assert_eq!(cfg.anthropic.model, "claude-sonnet-4-5");
    assert_eq!(cfg.openai.openai_mode, OpenAiApiMode::Responses);
    assert_eq!(cfg.openai.base_url, "https://example.test/v1");
    assert_eq!(cfg.get(Provider::Anthropic).max_tokens, 256);
    assert_eq!(cfg.get(Provider::OpenAi).timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn blank_key_counts_as_missing() {
    let cfg = ComparisonConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap();
    assert_eq!(cfg.openai.api_key, None);
}

#[test]
fn unparseable_numbers_fall_back_to_defaults() {
    let cfg = ComparisonConfig::from_lookup(lookup_from(&[("PROMPTDIFF_MAX_TOKENS", "lots")])).unwrap();
    assert_eq!(cfg.anthropic.max_tokens, DEFAULT_MAX_TOKENS);
}

#[test]
fn unknown_openai_mode_errors() {
    let err = ComparisonConfig::from_lookup(lookup_from(&[("PROMPTDIFF_OPENAI_MODE", "bad_mode")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("unsupported openai_api mode"));
}
