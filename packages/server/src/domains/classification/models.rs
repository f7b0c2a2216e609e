use serde::Serialize;

use crate::common::Label;
use super::ConfidenceGate;

/// Softmax output of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    pub fake: f32,
    pub real: f32,
}

/// Classifier verdict for one article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceResult {
    pub label: Label,
    pub confidence: f32,
    pub needs_verification: bool,
    pub probabilities: Probabilities,
}

impl InferenceResult {
    /// Build the verdict from `[fake, real]` probabilities.
    ///
    /// The label is the argmax (ties go to `Fake`, index 0) and the
    /// confidence is the winning probability.
    pub fn from_probabilities([fake, real]: [f32; 2], gate: ConfidenceGate) -> Self {
        let (label, confidence) = if real > fake {
            (Label::Real, real)
        } else {
            (Label::Fake, fake)
        };

        Self {
            label,
            confidence,
            needs_verification: gate.needs_verification(confidence),
            probabilities: Probabilities { fake, real },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_and_confidence() {
        let result = InferenceResult::from_probabilities([0.08, 0.92], ConfidenceGate::default());
        assert_eq!(result.label, Label::Real);
        assert_eq!(result.confidence, 0.92);
        assert!(!result.needs_verification);
        assert!((result.probabilities.fake + result.probabilities.real - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_low_confidence_fake_needs_verification() {
        let result = InferenceResult::from_probabilities([0.55, 0.45], ConfidenceGate::default());
        assert_eq!(result.label, Label::Fake);
        assert_eq!(result.confidence, 0.55);
        assert!(result.needs_verification);
    }

    #[test]
    fn test_tie_goes_to_fake() {
        let result = InferenceResult::from_probabilities([0.5, 0.5], ConfidenceGate::default());
        assert_eq!(result.label, Label::Fake);
        assert!(result.needs_verification);
    }

    #[test]
    fn test_serializes_flat_fields() {
        let result = InferenceResult::from_probabilities([0.25, 0.75], ConfidenceGate::new(0.7));
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["label"], "Real");
        assert_eq!(json["needs_verification"], false);
        assert_eq!(json["probabilities"]["fake"], 0.25);
    }
}
