use tracing::info;

use super::parser::parse_verification_reply;
use super::prompts::LOW_CONFIDENCE_VERIFY;
use super::VerificationResult;
use crate::kernel::BaseChatModel;

/// Ask the fact-checker whether `article_text` is real or fake.
///
/// One chat call; the parsed verdict and the raw response body come from the
/// same reply.
pub async fn verify_article(
    chat: &dyn BaseChatModel,
    article_text: &str,
) -> llm_client::Result<VerificationResult> {
    let messages = LOW_CONFIDENCE_VERIFY.format(&[("article_text", article_text)]);
    let response = chat.complete(messages).await?;
    let parsed = parse_verification_reply(&response.content);

    info!(prediction = %parsed.prediction, "Verification complete");

    Ok(VerificationResult {
        prediction: parsed.prediction,
        reasoning: parsed.reasoning,
        raw: response.raw,
    })
}
