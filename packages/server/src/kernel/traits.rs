// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (the confidence gate, verdict parsing, prompt selection) lives
// in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseClassifier, BaseChatModel)

use anyhow::Result;
use async_trait::async_trait;
use llm_client::{ChatResponse, Message};

// =============================================================================
// Classifier Trait (Infrastructure - sequence classification model)
// =============================================================================

#[async_trait]
pub trait BaseClassifier: Send + Sync {
    /// Class probabilities for `text`, indexed `[fake, real]`
    async fn probabilities(&self, text: &str) -> Result<[f32; 2]>;

    /// Load the model if it is not loaded yet
    async fn ensure_loaded(&self) -> Result<()>;

    /// Device the model runs on ("cpu", "cuda", ...)
    fn device_name(&self) -> String;
}

// =============================================================================
// Chat Model Trait (Infrastructure - remote LLM chat completions)
// =============================================================================

#[async_trait]
pub trait BaseChatModel: Send + Sync {
    /// Send the messages at temperature 0 and return the reply
    ///
    /// Errors stay typed so routes can tell missing credentials from remote
    /// failures.
    async fn complete(&self, messages: Vec<Message>) -> llm_client::Result<ChatResponse>;
}
