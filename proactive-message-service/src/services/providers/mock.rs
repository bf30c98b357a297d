//! Mock provider implementation for testing.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// One scripted outcome for [`MockTextProvider`].
pub enum MockReply {
    Text(String),
    Error(ProviderError),
}

/// Mock text provider that replays scripted replies in order and records
/// every prompt it receives.
#[derive(Default)]
pub struct MockTextProvider {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push_text(&self, text: impl Into<String>) {
        lock(&self.replies).push_back(MockReply::Text(text.into()));
    }

    pub fn push_error(&self, error: ProviderError) {
        lock(&self.replies).push_back(MockReply::Error(error));
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        lock(&self.prompts).push(prompt.to_string());

        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(ProviderResponse {
                output_tokens: text.split_whitespace().count() as i32,
                input_tokens: prompt.split_whitespace().count() as i32,
                text,
                finish_reason: FinishReason::Complete,
            }),
            Some(MockReply::Error(error)) => Err(error),
            None => Err(ProviderError::NotConfigured(
                "Mock text provider has no scripted reply".to_string(),
            )),
        }
    }
}
