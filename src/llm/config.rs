//! Provider configuration parsed from environment variables.

use super::types::ProviderError;
use crate::provider::Provider;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Everything needed to build one provider's client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: Provider,
    /// Name of the env var the key is read from; reported when it is missing.
    pub key_var: &'static str,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub openai_mode: OpenAiApiMode,
    pub timeouts: Timeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
}

impl ComparisonConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`: a missing key leaves that
    ///   provider unconfigured
    /// - `PROMPTDIFF_OPENAI_MODEL`: default `gpt-4`
    /// - `PROMPTDIFF_ANTHROPIC_MODEL`: default `claude-3-opus-20240229`
    /// - `PROMPTDIFF_OPENAI_MODE`: `chat_completions` (default) or `responses`
    /// - `PROMPTDIFF_OPENAI_BASE_URL`, `PROMPTDIFF_ANTHROPIC_BASE_URL`
    /// - `PROMPTDIFF_MAX_TOKENS`: default 1000
    /// - `PROMPTDIFF_REQUEST_TIMEOUT_SECS`: default 120
    /// - `PROMPTDIFF_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ConfigParse`] for an unknown `OpenAI` mode.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ComparisonConfig::from_env`] with an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ConfigParse`] for an unknown `OpenAI` mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let openai_mode = parse_openai_mode(lookup("PROMPTDIFF_OPENAI_MODE").as_deref())?;
        let max_tokens = parse_or("PROMPTDIFF_MAX_TOKENS", &lookup, DEFAULT_MAX_TOKENS);
        let timeouts = Timeouts {
            request_secs: parse_or("PROMPTDIFF_REQUEST_TIMEOUT_SECS", &lookup, DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or("PROMPTDIFF_CONNECT_TIMEOUT_SECS", &lookup, DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let openai = ProviderConfig {
            provider: Provider::OpenAi,
            key_var: "OPENAI_API_KEY",
            api_key: non_empty(lookup("OPENAI_API_KEY")),
            model: lookup("PROMPTDIFF_OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_url: base_url(lookup("PROMPTDIFF_OPENAI_BASE_URL"), DEFAULT_OPENAI_BASE_URL),
            max_tokens,
            openai_mode,
            timeouts,
        };
        let anthropic = ProviderConfig {
            provider: Provider::Anthropic,
            key_var: "ANTHROPIC_API_KEY",
            api_key: non_empty(lookup("ANTHROPIC_API_KEY")),
            model: lookup("PROMPTDIFF_ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            base_url: base_url(lookup("PROMPTDIFF_ANTHROPIC_BASE_URL"), DEFAULT_ANTHROPIC_BASE_URL),
            max_tokens,
            openai_mode,
            timeouts,
        };

        Ok(Self { openai, anthropic })
    }

    #[must_use]
    pub fn get(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Anthropic => &self.anthropic,
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn base_url(raw: Option<String>, default: &str) -> String {
    raw.as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

fn parse_openai_mode(raw: Option<&str>) -> Result<OpenAiApiMode, ProviderError> {
    match raw.unwrap_or("chat_completions") {
        "chat_completions" => Ok(OpenAiApiMode::ChatCompletions),
        "responses" => Ok(OpenAiApiMode::Responses),
        other => Err(ProviderError::ConfigParse(format!(
            "unsupported openai_api mode '{other}' (expected 'responses' or 'chat_completions')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
