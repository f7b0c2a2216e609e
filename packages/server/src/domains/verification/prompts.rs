//! Prompt templates for the three LLM interaction flows.
//!
//! Placeholders are written `{{name}}` and replaced by plain string
//! substitution: no escaping, and unknown placeholders stay as they are.

use llm_client::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: &'static str,
}

/// Ordered chat messages with `{{name}}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub messages: &'static [PromptMessage],
}

impl PromptTemplate {
    /// Substitute every `(name, value)` pair into each message, in order.
    pub fn format(&self, values: &[(&str, &str)]) -> Vec<Message> {
        self.messages
            .iter()
            .map(|message| {
                let content = values.iter().fold(
                    message.content.to_string(),
                    |content, (name, value)| content.replace(&format!("{{{{{}}}}}", name), value),
                );
                Message::new(message.role.as_str(), content)
            })
            .collect()
    }
}

/// General question with no article attached.
pub const DIRECT_QUESTION: PromptTemplate = PromptTemplate {
    messages: &[
        PromptMessage {
            role: PromptRole::System,
            content: "You are an expert AI assistant. The user is asking a general question. \
                      You must answer using strictly correct, verified, up-to-date information. \
                      Always structure the output as clear bullet points. Never guess or hallucinate. \
                      If uncertain, say 'Information not confirmed'.",
        },
        PromptMessage {
            role: PromptRole::User,
            content: "User question:\n{{user_question}}\n\n\
                      Respond only with accurate and fact-checked bullet points.",
        },
    ],
};

/// Follow-up question about a previously classified article.
pub const FOLLOWUP_NEWS: PromptTemplate = PromptTemplate {
    messages: &[
        PromptMessage {
            role: PromptRole::System,
            content: "You are assisting the user in understanding a specific news article. \
                      You must use ONLY the provided context. Do not add new facts outside the article \
                      unless they are universally verified and up-to-date. \
                      Always answer clearly, factually, and without speculation.",
        },
        PromptMessage {
            role: PromptRole::User,
            content: "Article Content:\n{{article_text}}\n\n\
                      Original Prediction: {{model_prediction}}\n\
                      Verification Summary (if available): {{verification_summary}}\n\n\
                      User's Follow-Up Question:\n{{user_question}}\n\n\
                      Provide a reliable, context-based answer backed strictly by the content above.",
        },
    ],
};

/// Fact-check of an article the classifier was unsure about.
pub const LOW_CONFIDENCE_VERIFY: PromptTemplate = PromptTemplate {
    messages: &[
        PromptMessage {
            role: PromptRole::System,
            content: "You are an AI fact-checking model assisting in verifying whether a news article is real or fake. \
                      The local classifier has low confidence. Your job is to determine Real or Fake \
                      and give strictly factual reasoning. Use only verified, up-to-date, and non-speculative information. \
                      Keep reasoning to 2–3 concise sentences.",
        },
        PromptMessage {
            role: PromptRole::User,
            content: "Article to verify:\n{{article_text}}\n\n\
                      Respond exactly in this format:\n\n\
                      Prediction: Real/Fake\n\
                      Reasoning: <2–3 factual sentences>",
        },
    ],
};
