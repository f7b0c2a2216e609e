use llm_client::Message;
use tracing::{debug, info};

use super::{ContextLookup, ContextStore};
use crate::common::utils::{clean_text_for_prompt, MAX_PROMPT_ARTICLE_CHARS};
use crate::domains::verification::prompts::{DIRECT_QUESTION, FOLLOWUP_NEWS};
use crate::kernel::BaseChatModel;

const UNKNOWN_PREDICTION: &str = "Unknown";
const NO_VERIFICATION: &str = "Not available";

/// A user question plus whatever article context came with it.
#[derive(Debug, Clone, Default)]
pub struct QuestionRequest {
    pub question: String,
    pub context_id: Option<String>,
    pub article_text: Option<String>,
    pub model_prediction: Option<String>,
    pub verification_summary: Option<String>,
}

/// Which prompt a question was answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFlow {
    /// Follow-up using an article from the context store
    StoredContext,
    /// Follow-up using article fields sent with the question
    InlineContext,
    /// General question, no article
    Direct,
}

/// Pick the prompt for `request` and fill it in.
///
/// A live stored context wins over inline article fields; an evicted or
/// unknown id is treated as if none was sent.
pub fn build_question_prompt(
    store: &ContextStore,
    request: &QuestionRequest,
) -> (QuestionFlow, Vec<Message>) {
    if let Some(id) = non_empty(&request.context_id) {
        match store.get(id) {
            ContextLookup::Found(context) => {
                let article = clean_text_for_prompt(&context.article_text, Some(MAX_PROMPT_ARTICLE_CHARS));
                let messages = FOLLOWUP_NEWS.format(&[
                    ("article_text", article.as_str()),
                    ("model_prediction", context.model_prediction.as_str()),
                    (
                        "verification_summary",
                        non_empty(&context.verification_reasoning).unwrap_or(NO_VERIFICATION),
                    ),
                    ("user_question", request.question.as_str()),
                ]);
                return (QuestionFlow::StoredContext, messages);
            }
            ContextLookup::Evicted => info!(context_id = %id, "Context expired or evicted"),
            ContextLookup::Missing => debug!(context_id = %id, "Unknown context id"),
        }
    }

    let article = non_empty(&request.article_text)
        .map(|text| clean_text_for_prompt(text, Some(MAX_PROMPT_ARTICLE_CHARS)))
        .filter(|text| !text.is_empty());

    match article {
        Some(article) => {
            let messages = FOLLOWUP_NEWS.format(&[
                ("article_text", article.as_str()),
                (
                    "model_prediction",
                    non_empty(&request.model_prediction).unwrap_or(UNKNOWN_PREDICTION),
                ),
                (
                    "verification_summary",
                    non_empty(&request.verification_summary).unwrap_or(NO_VERIFICATION),
                ),
                ("user_question", request.question.as_str()),
            ]);
            (QuestionFlow::InlineContext, messages)
        }
        None => (
            QuestionFlow::Direct,
            DIRECT_QUESTION.format(&[("user_question", request.question.as_str())]),
        ),
    }
}

/// Answer `request` with one LLM call and return the raw answer text.
pub async fn answer_question(
    chat: &dyn BaseChatModel,
    store: &ContextStore,
    request: &QuestionRequest,
) -> llm_client::Result<String> {
    let (flow, messages) = build_question_prompt(store, request);
    let response = chat.complete(messages).await?;

    info!(flow = ?flow, "Question answered");
    Ok(response.content)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Label, Verdict};
    use crate::domains::conversation::ArticleContext;
    use crate::kernel::test_dependencies::MockChatModel;
    use std::time::Duration;

    fn store_with(id: &str, reasoning: Option<&str>) -> ContextStore {
        let store = ContextStore::default();
        store
            .put(
                id,
                ArticleContext {
                    article_text: "Council   votes\n\nto expand transit.".to_string(),
                    model_prediction: Label::Fake,
                    model_confidence: 0.6,
                    verification_reasoning: reasoning.map(str::to_string),
                    verification_prediction: reasoning.map(|_| Verdict::Real),
                },
            )
            .unwrap();
        store
    }

    fn question(text: &str) -> QuestionRequest {
        QuestionRequest {
            question: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stored_context_is_used() {
        let store = store_with("ctx-1", Some("Officials confirmed the vote."));
        let request = QuestionRequest {
            context_id: Some("ctx-1".into()),
            article_text: Some("ignored inline text".into()),
            ..question("When does construction start?")
        };

        let (flow, messages) = build_question_prompt(&store, &request);

        assert_eq!(flow, QuestionFlow::StoredContext);
        let user = &messages[1].content;
        assert!(user.starts_with("Article Content:\nCouncil votes to expand transit.\n\n"));
        assert!(user.contains("Original Prediction: Fake\n"));
        assert!(user.contains("Verification Summary (if available): Officials confirmed the vote.\n"));
        assert!(user.contains("When does construction start?"));
    }

    #[test]
    fn test_stored_context_without_verification() {
        let store = store_with("ctx-1", None);
        let request = QuestionRequest {
            context_id: Some("ctx-1".into()),
            ..question("Why?")
        };

        let (_, messages) = build_question_prompt(&store, &request);
        assert!(messages[1]
            .content
            .contains("Verification Summary (if available): Not available\n"));
    }

    #[test]
    fn test_inline_context_defaults() {
        let store = ContextStore::default();
        let request = QuestionRequest {
            context_id: Some("unknown-id".into()),
            article_text: Some("Inline article".into()),
            ..question("Is it true?")
        };

        let (flow, messages) = build_question_prompt(&store, &request);

        assert_eq!(flow, QuestionFlow::InlineContext);
        assert!(messages[1].content.contains("Original Prediction: Unknown\n"));
        assert!(messages[1].content.contains("(if available): Not available\n"));
    }

    #[test]
    fn test_inline_context_fields_are_passed_through() {
        let request = QuestionRequest {
            article_text: Some("Inline article".into()),
            model_prediction: Some("Real".into()),
            verification_summary: Some("Matches wire reports.".into()),
            ..question("Source?")
        };

        let (_, messages) = build_question_prompt(&ContextStore::default(), &request);
        assert!(messages[1].content.contains("Original Prediction: Real\n"));
        assert!(messages[1].content.contains("(if available): Matches wire reports.\n"));
    }

    #[test]
    fn test_direct_question() {
        let (flow, messages) =
            build_question_prompt(&ContextStore::default(), &question("What is the capital of France?"));

        assert_eq!(flow, QuestionFlow::Direct);
        assert_eq!(
            messages[1].content,
            "User question:\nWhat is the capital of France?\n\nRespond only with accurate and fact-checked bullet points."
        );
    }

    #[test]
    fn test_blank_inline_article_is_direct() {
        let request = QuestionRequest {
            article_text: Some("  \n ".into()),
            ..question("Hello?")
        };
        let (flow, _) = build_question_prompt(&ContextStore::default(), &request);
        assert_eq!(flow, QuestionFlow::Direct);
    }

    fn context(text: &str) -> ArticleContext {
        ArticleContext {
            article_text: text.to_string(),
            model_prediction: Label::Real,
            model_confidence: 0.9,
            verification_reasoning: None,
            verification_prediction: None,
        }
    }

    #[test]
    fn test_capacity_evicted_context_is_treated_as_unknown() {
        let store = ContextStore::new(1, ContextStore::DEFAULT_TTL);
        store.put("old", context("Old article")).unwrap();
        store.put("new", context("New article")).unwrap();
        assert_eq!(store.get("old"), ContextLookup::Evicted);

        let inline = QuestionRequest {
            context_id: Some("old".into()),
            article_text: Some("Inline article".into()),
            ..question("Still there?")
        };
        let (flow, messages) = build_question_prompt(&store, &inline);
        assert_eq!(flow, QuestionFlow::InlineContext);
        assert!(messages[1].content.starts_with("Article Content:\nInline article\n"));

        let bare = QuestionRequest {
            context_id: Some("old".into()),
            ..question("Still there?")
        };
        let (flow, _) = build_question_prompt(&store, &bare);
        assert_eq!(flow, QuestionFlow::Direct);
    }

    #[test]
    fn test_expired_context_is_treated_as_unknown() {
        let store = ContextStore::new(10, Duration::ZERO);
        store.put("ctx", context("Expired article")).unwrap();

        let inline = QuestionRequest {
            context_id: Some("ctx".into()),
            article_text: Some("Inline article".into()),
            ..question("Why?")
        };
        let (flow, messages) = build_question_prompt(&store, &inline);
        assert_eq!(flow, QuestionFlow::InlineContext);
        assert!(!messages[1].content.contains("Expired article"));

        let bare = QuestionRequest {
            context_id: Some("ctx".into()),
            ..question("Why?")
        };
        let (flow, _) = build_question_prompt(&store, &bare);
        assert_eq!(flow, QuestionFlow::Direct);
    }

    #[tokio::test]
    async fn test_answer_returns_raw_reply() {
        let chat = MockChatModel::new().with_response("- Paris is the capital of France.");
        let answer = answer_question(&chat, &ContextStore::default(), &question("Capital of France?"))
            .await
            .unwrap();

        assert_eq!(answer, "- Paris is the capital of France.");
        assert_eq!(chat.call_count(), 1);
    }

    #[tokio::test]
    async fn test_answer_propagates_config_error() {
        let chat = MockChatModel::without_api_key();
        let err = answer_question(&chat, &ContextStore::default(), &question("Hi"))
            .await
            .unwrap_err();
        assert!(err.is_config());
    }
}
