use super::providers::{ProviderError, TextProvider};
use std::sync::Arc;

/// Sends the pre-rendered opening prompt to the provider.
///
/// Holds no per-request state; every call is one independent provider round
/// trip.
#[derive(Clone)]
pub struct ProactiveMessageService {
    prompt: Arc<str>,
    provider: Arc<dyn TextProvider>,
}

impl ProactiveMessageService {
    pub fn new(prompt: impl Into<Arc<str>>, provider: Arc<dyn TextProvider>) -> Self {
        Self {
            prompt: prompt.into(),
            provider,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Generate one opening message. The provider's text is returned as is.
    #[tracing::instrument(skip(self))]
    pub async fn get_proactive_message(&self) -> Result<String, ProviderError> {
        tracing::info!(
            provider = self.provider.name(),
            prompt_len = self.prompt.len(),
            "Sending prompt to text provider"
        );

        let response = self.provider.generate(&self.prompt).await?;

        tracing::info!(
            provider = self.provider.name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Received response from text provider"
        );

        Ok(response.text)
    }
}
