//! LLM types: provider-neutral messages, errors, and the completion port.
//!
//! Shared by the `OpenAI` and Anthropic clients and by the comparison
//! session, which only ever sees a provider through [`Completion`].

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by provider configuration or a completion call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The provider rejected the credentials (401/403).
    #[error("authentication failed: status {status}")]
    Auth { status: u16, body: String },

    /// The provider throttled the request (429).
    #[error("rate limited by provider")]
    RateLimited { body: String },

    /// Any other non-success HTTP status.
    #[error("API response error: status {status}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response decoded but carried no text.
    #[error("response contained no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Classify a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Auth { status, body },
            429 => Self::RateLimited { body },
            _ => Self::Api { status, body },
        }
    }
}

impl ErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Network(_) => "E_NETWORK",
            Self::Auth { .. } => "E_AUTH",
            Self::RateLimited { .. } => "E_RATE_LIMITED",
            Self::Api { .. } => "E_API_RESPONSE",
            Self::Malformed(_) => "E_MALFORMED_RESPONSE",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. } | Self::Api { status: 500..=599, .. })
    }
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in the normalized list handed to a completion function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Split a leading system message off a normalized list.
///
/// Returns the system text (if any) and the remaining conversation.
#[must_use]
pub fn split_system(messages: &[Message]) -> (Option<&str>, &[Message]) {
    match messages.split_first() {
        Some((first, rest)) if first.role == Role::System => (Some(first.content.as_str()), rest),
        _ => (None, messages),
    }
}

// =============================================================================
// COMPLETION PORT
// =============================================================================

/// Provider-neutral text completion. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Completion: Send + Sync {
    /// Send the messages and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the request fails, the response is
    /// malformed or empty, or the provider is not configured.
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError>;
}

/// Stand-in for a provider whose API key is absent. Every call fails, which
/// leaves the other provider usable.
pub struct Unconfigured {
    pub key_var: String,
}

#[async_trait::async_trait]
impl Completion for Unconfigured {
    async fn complete(&self, _messages: &[Message]) -> Result<String, ProviderError> {
        Err(ProviderError::MissingApiKey { var: self.key_var.clone() })
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
