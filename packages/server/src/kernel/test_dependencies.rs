// Mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use llm_client::{ChatResponse, LlmError, Message};
use std::sync::{Arc, Mutex};

use super::{BaseChatModel, BaseClassifier};

// =============================================================================
// Mock Classifier
// =============================================================================

pub struct MockClassifier {
    probabilities: [f32; 2],
    fail_with: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    /// Classifier that always returns `[fake, real]`
    pub fn new(fake: f32, real: f32) -> Self {
        Self {
            probabilities: [fake, real],
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Classifier that is confidently real
    pub fn confident_real() -> Self {
        Self::new(0.08, 0.92)
    }

    /// Classifier whose model never loads
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(0.5, 0.5)
        }
    }

    /// Texts that were classified
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseClassifier for MockClassifier {
    async fn probabilities(&self, text: &str) -> Result<[f32; 2]> {
        self.calls.lock().unwrap().push(text.to_string());
        match &self.fail_with {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(self.probabilities),
        }
    }

    async fn ensure_loaded(&self) -> Result<()> {
        match &self.fail_with {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(()),
        }
    }

    fn device_name(&self) -> String {
        "cpu".to_string()
    }
}

// =============================================================================
// Mock Chat Model
// =============================================================================

/// Scripted failure for the mock chat model
#[derive(Debug, Clone)]
pub enum MockChatFailure {
    MissingKey,
    Api { status: u16, body: String },
}

pub struct MockChatModel {
    responses: Arc<Mutex<Vec<String>>>,
    default_response: String,
    failure: Option<MockChatFailure>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "Prediction: Real\nReasoning: Mock reasoning.".to_string(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a reply; queued replies are returned in order before the default
    pub fn with_response(self, content: &str) -> Self {
        self.responses.lock().unwrap().push(content.to_string());
        self
    }

    /// Reply used once the queue is empty
    pub fn with_default_response(mut self, content: &str) -> Self {
        self.default_response = content.to_string();
        self
    }

    /// Every call fails as if no API key were configured
    pub fn without_api_key() -> Self {
        Self {
            failure: Some(MockChatFailure::MissingKey),
            ..Self::new()
        }
    }

    /// Every call fails with a non-success HTTP status
    pub fn failing_with_status(status: u16, body: &str) -> Self {
        Self {
            failure: Some(MockChatFailure::Api {
                status,
                body: body.to_string(),
            }),
            ..Self::new()
        }
    }

    /// Messages sent on each call
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseChatModel for MockChatModel {
    async fn complete(&self, messages: Vec<Message>) -> llm_client::Result<ChatResponse> {
        self.calls.lock().unwrap().push(messages);

        match &self.failure {
            Some(MockChatFailure::MissingKey) => {
                return Err(LlmError::Config(
                    "GROQ_API_KEY is missing. Please set it in the environment.".to_string(),
                ))
            }
            Some(MockChatFailure::Api { status, body }) => {
                return Err(LlmError::Api {
                    status: *status,
                    body: body.clone(),
                })
            }
            None => {}
        }

        let content = {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                self.default_response.clone()
            } else {
                responses.remove(0)
            }
        };

        ChatResponse::from_raw(serde_json::json!({
            "id": "mock-completion",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        }))
    }
}
