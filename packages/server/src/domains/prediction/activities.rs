//! The predict pipeline: resolve, classify, gate, maybe verify, remember.

use extraction::{ArticleSource, ResolveError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::utils::{clean_text_for_prompt, MAX_PROMPT_ARTICLE_CHARS};
use crate::domains::classification::{classify_article, InferenceResult};
use crate::domains::conversation::{ArticleContext, ContextStore};
use crate::domains::verification::{verify_article, VerificationResult};
use crate::kernel::{BaseChatModel, ServerDeps};

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The input could not be turned into article text
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The classifier failed to load or run
    #[error("classification failed: {0}")]
    Classification(String),
}

/// Everything `/predict` reports back.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub article_text: String,
    pub context_id: String,
    pub inference: InferenceResult,
    pub auto_verification: Option<VerificationResult>,
}

/// Classify an article, escalating to the fact-checker when the classifier is
/// unsure, and store the result for follow-up questions.
///
/// Verification failures are logged and the prediction is returned without
/// one. `requested_id` is honoured unless it already names a live context,
/// in which case a fresh id is generated.
pub async fn run_prediction(
    deps: &ServerDeps,
    source: ArticleSource,
    requested_id: Option<String>,
) -> Result<PredictionOutcome, PredictionError> {
    let article_text = deps.resolver.resolve(source).await?;

    let inference = classify_article(deps.classifier.as_ref(), deps.gate, &article_text)
        .await
        .map_err(|e| PredictionError::Classification(format!("{:#}", e)))?;

    let auto_verification = if inference.needs_verification {
        auto_verify(deps.chat.as_ref(), &article_text, inference.confidence).await
    } else {
        None
    };

    let context = ArticleContext {
        article_text: article_text.clone(),
        model_prediction: inference.label,
        model_confidence: inference.confidence,
        verification_reasoning: auto_verification.as_ref().map(|v| v.reasoning.clone()),
        verification_prediction: auto_verification.as_ref().map(|v| v.prediction),
    };
    let context_id = store_context(&deps.contexts, requested_id, context);

    info!(
        label = %inference.label,
        confidence = inference.confidence,
        context_id = %context_id,
        verified = auto_verification.is_some(),
        "Prediction complete"
    );

    Ok(PredictionOutcome {
        article_text,
        context_id,
        inference,
        auto_verification,
    })
}

async fn auto_verify(
    chat: &dyn BaseChatModel,
    article_text: &str,
    confidence: f32,
) -> Option<VerificationResult> {
    info!(confidence = confidence, "Low confidence detected, auto-verifying with LLM");

    let cleaned = clean_text_for_prompt(article_text, Some(MAX_PROMPT_ARTICLE_CHARS));
    match verify_article(chat, &cleaned).await {
        Ok(result) => Some(result),
        Err(e) => {
            warn!(error = %e, "Auto-verification failed, continuing without it");
            None
        }
    }
}

fn store_context(store: &ContextStore, requested_id: Option<String>, context: ArticleContext) -> String {
    if let Some(id) = requested_id.filter(|id| !id.trim().is_empty()) {
        match store.put(&id, context.clone()) {
            Ok(()) => return id,
            Err(e) => warn!(error = %e, "Requested context id is live, generating a new one"),
        }
    }

    loop {
        let id = Uuid::new_v4().to_string();
        if store.put(&id, context.clone()).is_ok() {
            return id;
        }
    }
}
