//! Parsing of the fact-checker's free-text reply.
//!
//! Structured `Prediction:` / `Reasoning:` lines are read first. When the
//! reply does not carry a usable prediction line, a coarse keyword scan over
//! the whole reply decides, and `Unknown` is returned when even that fails.

use tracing::warn;

use crate::common::Verdict;

/// Prediction and reasoning extracted from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerdict {
    pub prediction: Verdict,
    pub reasoning: String,
}

pub fn parse_verification_reply(content: &str) -> ParsedVerdict {
    let lines: Vec<&str> = content.lines().collect();
    let mut prediction = None;
    let mut reasoning: Option<String> = None;

    for (i, line) in lines.iter().enumerate() {
        let lower = line.trim().to_lowercase();

        if lower.contains("prediction") {
            if let Some((_, value)) = line.split_once(':') {
                let value = value.trim().to_lowercase();
                if value.contains("real") {
                    prediction = Some(Verdict::Real);
                } else if value.contains("fake") {
                    prediction = Some(Verdict::Fake);
                }
            }
        }

        if lower.contains("reasoning") {
            if let Some((_, value)) = line.split_once(':') {
                let mut parts = vec![value.trim()];
                parts.extend(
                    lines[i + 1..]
                        .iter()
                        .filter(|rest| {
                            !rest.trim().is_empty()
                                && !rest.to_lowercase().starts_with("prediction")
                        })
                        .map(|rest| rest.trim()),
                );
                reasoning = Some(parts.join(" ").trim().to_string());
                break;
            }
        }
    }

    let reasoning = match reasoning.filter(|r| !r.is_empty() && r != content) {
        Some(reasoning) => reasoning,
        None => {
            let joined = lines
                .iter()
                .filter(|line| !line.trim().to_lowercase().starts_with("prediction"))
                .map(|line| line.trim())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            if joined.is_empty() {
                content.to_string()
            } else {
                joined
            }
        }
    };

    let prediction = prediction.unwrap_or_else(|| coarse_prediction(content));

    ParsedVerdict {
        prediction,
        reasoning,
    }
}

/// Keyword fallback over the whole reply.
///
/// `Real` wins when "real" appears and "fake" does not appear before the end
/// of the 10 characters starting at the first "real". Replies like
/// "not real, it is fake" can still land on `Real` when the "fake" comes
/// later; this tie-breaking is kept deliberately.
fn coarse_prediction(content: &str) -> Verdict {
    let lower = content.to_lowercase();

    if let Some(start) = lower.find("real") {
        let end = lower[start..]
            .char_indices()
            .nth(10)
            .map(|(offset, _)| start + offset)
            .unwrap_or(lower.len());
        if !lower[..end].contains("fake") {
            return Verdict::Real;
        }
    }

    if lower.contains("fake") {
        return Verdict::Fake;
    }

    warn!("Could not parse prediction from LLM response, defaulting to Unknown");
    Verdict::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_reply() {
        let parsed = parse_verification_reply("Prediction: Real\nReasoning: It cites named officials.");
        assert_eq!(parsed.prediction, Verdict::Real);
        assert_eq!(parsed.reasoning, "It cites named officials.");
    }

    #[test]
    fn test_multiline_reasoning_is_joined() {
        let reply = "Prediction: Fake\nReasoning: No outlet reported this.\n\n  The quoted agency denies it.\nPrediction: Fake";
        let parsed = parse_verification_reply(reply);
        assert_eq!(parsed.prediction, Verdict::Fake);
        assert_eq!(parsed.reasoning, "No outlet reported this. The quoted agency denies it.");
    }

    #[test]
    fn test_prediction_value_is_case_insensitive() {
        let parsed = parse_verification_reply("**PREDICTION:** REAL\nReasoning: Consistent with records.");
        assert_eq!(parsed.prediction, Verdict::Real);
    }

    #[test]
    fn test_real_is_tested_before_fake() {
        let parsed = parse_verification_reply("Prediction: Real (not fake)\nReasoning: Confirmed.");
        assert_eq!(parsed.prediction, Verdict::Real);
    }

    #[test]
    fn test_missing_reasoning_uses_other_lines() {
        let parsed = parse_verification_reply("Prediction: Fake\nThe story was debunked.\nMultiple sources disagree.");
        assert_eq!(parsed.prediction, Verdict::Fake);
        assert_eq!(parsed.reasoning, "The story was debunked. Multiple sources disagree.");
    }

    #[test]
    fn test_only_prediction_line_keeps_full_reply() {
        let parsed = parse_verification_reply("Prediction: Fake");
        assert_eq!(parsed.reasoning, "Prediction: Fake");
    }

    #[test]
    fn test_coarse_fallback_fake() {
        let parsed = parse_verification_reply("This article is fake.");
        assert_eq!(parsed.prediction, Verdict::Fake);
        assert_eq!(parsed.reasoning, "This article is fake.");
    }

    #[test]
    fn test_coarse_fallback_real() {
        let parsed = parse_verification_reply("Everything here looks real to me.");
        assert_eq!(parsed.prediction, Verdict::Real);
    }

    #[test]
    fn test_coarse_fallback_fake_near_real() {
        // "fake" sits inside the 10 characters after "real"
        let parsed = parse_verification_reply("Not real; fake story.");
        assert_eq!(parsed.prediction, Verdict::Fake);
    }

    #[test]
    fn test_coarse_fallback_late_fake_keeps_real() {
        let parsed = parse_verification_reply("The event is real. Some called it fake later on.");
        assert_eq!(parsed.prediction, Verdict::Real);
    }

    #[test]
    fn test_unparseable_is_unknown() {
        let parsed = parse_verification_reply("I cannot determine this.");
        assert_eq!(parsed.prediction, Verdict::Unknown);
        assert_eq!(parsed.reasoning, "I cannot determine this.");
    }

    #[test]
    fn test_prediction_line_without_label_falls_back() {
        let parsed = parse_verification_reply("Prediction: unclear\nReasoning: The claim sounds fake.");
        assert_eq!(parsed.prediction, Verdict::Fake);
        assert_eq!(parsed.reasoning, "The claim sounds fake.");
    }
}
