// Chat model implementation using an OpenAI-compatible endpoint (Groq)
//
// This is the infrastructure implementation of BaseChatModel.
// Business logic (what to prompt for) lives in domain layers.

use async_trait::async_trait;
use llm_client::{ChatRequest, ChatResponse, LlmClient, LlmError, Message};
use std::time::Duration;

use super::BaseChatModel;

/// Groq-backed chat model.
///
/// Built even without an API key so the service can start; every call then
/// fails with a configuration error.
#[derive(Debug, Clone)]
pub struct GroqChatModel {
    client: Option<LlmClient>,
    model: String,
}

impl GroqChatModel {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = api_key.map(|key| {
            LlmClient::new(key)
                .with_base_url(base_url)
                .with_timeout(timeout)
        });

        if client.is_none() {
            tracing::warn!(
                "{} is not set; verification and Q&A will be unavailable",
                llm_client::API_KEY_ENV
            );
        }

        Self {
            client,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseChatModel for GroqChatModel {
    async fn complete(&self, messages: Vec<Message>) -> llm_client::Result<ChatResponse> {
        let client = self.client.as_ref().ok_or_else(|| {
            LlmError::Config(format!(
                "{} is missing. Please set it in the environment.",
                llm_client::API_KEY_ENV
            ))
        })?;

        client
            .chat_completion(
                ChatRequest::new(&self.model)
                    .messages(messages)
                    .temperature(0.0),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let model = GroqChatModel::new(
            None,
            llm_client::GROQ_BASE_URL,
            llm_client::DEFAULT_MODEL,
            Duration::from_secs(1),
        );
        assert!(!model.is_configured());

        let err = model
            .complete(vec![Message::user("hello")])
            .await
            .unwrap_err();
        assert!(err.is_config());
    }
}
