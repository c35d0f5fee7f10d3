//! LLM: provider adapters behind a single completion port.
//!
//! DESIGN
//! ======
//! The comparison session only knows [`Completion`]. `ProviderClient`
//! dispatches to the Anthropic or `OpenAI` HTTP client and applies the
//! configured model and token limit. A provider without an API key gets an
//! [`Unconfigured`] completion instead, so it fails per call while the other
//! provider keeps working.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use std::sync::Arc;

use config::{ComparisonConfig, ProviderConfig};
pub use types::{Completion, Message, ProviderError, Role, Unconfigured};

use crate::provider::Provider;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete completion client for one provider.
pub struct ProviderClient {
    inner: ClientKind,
    model: String,
    max_tokens: u32,
}

enum ClientKind {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl ProviderClient {
    /// Build a client from its typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingApiKey`] when no key is configured, or
    /// an error if the HTTP client fails to build.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::MissingApiKey { var: config.key_var.to_string() })?;
        let inner = match config.provider {
            Provider::Anthropic => {
                ClientKind::Anthropic(anthropic::AnthropicClient::new(api_key, config.base_url.clone(), config.timeouts)?)
            }
            Provider::OpenAi => ClientKind::OpenAi(openai::OpenAiClient::new(
                api_key,
                config.openai_mode,
                config.base_url.clone(),
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model: config.model.clone(), max_tokens: config.max_tokens })
    }

    /// Return the configured model name (e.g. `"gpt-4"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl Completion for ProviderClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        match &self.inner {
            ClientKind::Anthropic(c) => c.complete(&self.model, self.max_tokens, messages).await,
            ClientKind::OpenAi(c) => c.complete(&self.model, self.max_tokens, messages).await,
        }
    }
}

/// Build the completion for `provider`, falling back to [`Unconfigured`]
/// when its key is missing.
///
/// # Errors
///
/// Returns an error only if the HTTP client fails to build.
pub fn completion_for(config: &ComparisonConfig, provider: Provider) -> Result<Arc<dyn Completion>, ProviderError> {
    let provider_config = config.get(provider);
    match ProviderClient::from_config(provider_config) {
        Ok(client) => {
            tracing::info!(%provider, model = client.model(), "provider client initialized");
            Ok(Arc::new(client))
        }
        Err(ProviderError::MissingApiKey { var }) => {
            tracing::warn!(%provider, %var, "API key not set; requests to this provider will fail");
            Ok(Arc::new(Unconfigured { key_var: var }))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(pairs: &[(&str, &str)]) -> ComparisonConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ComparisonConfig::from_lookup(|key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    #[test]
    fn from_config_without_key_errors() {
        let config = config_with(&[]);
        let err = ProviderClient::from_config(&config.openai).err().unwrap();
        assert!(matches!(err, ProviderError::MissingApiKey { var } if var == "OPENAI_API_KEY"));
    }

    #[test]
    fn from_config_uses_configured_model() {
        let config = config_with(&[("ANTHROPIC_API_KEY", "ak"), ("PROMPTDIFF_ANTHROPIC_MODEL", "claude-x")]);
        let client = ProviderClient::from_config(&config.anthropic).unwrap();
        assert_eq!(client.model(), "claude-x");
    }

    #[tokio::test]
    async fn completion_for_missing_key_fails_per_call() {
        let config = config_with(&[("OPENAI_API_KEY", "sk")]);
        let anthropic = completion_for(&config, Provider::Anthropic).unwrap();
        let err = anthropic.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey { var } if var == "ANTHROPIC_API_KEY"));
        assert!(completion_for(&config, Provider::OpenAi).is_ok());
    }
}
