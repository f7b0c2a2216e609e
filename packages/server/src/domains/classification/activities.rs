use anyhow::Result;
use tracing::info;

use super::{ConfidenceGate, InferenceResult};
use crate::kernel::BaseClassifier;

/// Run the classifier on `text` and apply the confidence gate.
pub async fn classify_article(
    classifier: &dyn BaseClassifier,
    gate: ConfidenceGate,
    text: &str,
) -> Result<InferenceResult> {
    let probabilities = classifier.probabilities(text).await?;
    let result = InferenceResult::from_probabilities(probabilities, gate);

    info!(
        label = %result.label,
        confidence = result.confidence,
        needs_verification = result.needs_verification,
        "Article classified"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Label;
    use crate::kernel::test_dependencies::MockClassifier;

    #[tokio::test]
    async fn test_classify_uses_gate() {
        let classifier = MockClassifier::new(0.45, 0.55);
        let result = classify_article(&classifier, ConfidenceGate::new(0.7), "Some article")
            .await
            .unwrap();

        assert_eq!(result.label, Label::Real);
        assert!(result.needs_verification);
        assert_eq!(classifier.calls(), vec!["Some article".to_string()]);
    }

    #[tokio::test]
    async fn test_classifier_failure_propagates() {
        let classifier = MockClassifier::failing("weights unavailable");
        let err = classify_article(&classifier, ConfidenceGate::default(), "text")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("weights unavailable"));
    }
}
