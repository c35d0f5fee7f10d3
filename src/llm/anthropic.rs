//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. The system prompt travels in the
//! top-level `system` field rather than as a message. Pure parsing in
//! `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::Timeouts;
use super::types::{Message, ProviderError, Role, split_system};

const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: Timeouts) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// Send `messages` and return the first text block of the reply.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport failure, non-200 status, or an
    /// undecodable or text-less body.
    pub async fn complete(&self, model: &str, max_tokens: u32, messages: &[Message]) -> Result<String, ProviderError> {
        let body = build_request(model, max_tokens, messages);
        let url = format!("{}/messages", self.base_url);

        let response = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if status != 200 {
            return Err(ProviderError::from_status(status, text));
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    /// Thinking, tool use, and any future block types.
    #[serde(other)]
    Other,
}

fn build_request<'a>(model: &'a str, max_tokens: u32, messages: &'a [Message]) -> ApiRequest<'a> {
    let (system, rest) = split_system(messages);
    let messages = rest
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| ApiMessage { role: m.role.as_str(), content: &m.content })
        .collect();
    ApiRequest { model, max_tokens, system: system.filter(|s| !s.is_empty()), messages }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<String, ProviderError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    api.content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } if !text.is_empty() => Some(text),
            _ => None,
        })
        .ok_or(ProviderError::EmptyResponse)
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
