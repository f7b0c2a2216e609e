//! Pure utility functions for content manipulation
//!
//! These functions contain NO side effects - they take inputs and return outputs
//! without touching the network or the filesystem.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Article text placed in an LLM prompt is cut to this many characters.
pub const MAX_PROMPT_ARTICLE_CHARS: usize = 8000;

/// Word-boundary truncation is only used when the boundary is past this share
/// of the limit.
const WORD_BOUNDARY_RATIO: f64 = 0.8;

/// Clean article text before it is placed into an LLM prompt.
///
/// Whitespace runs (newlines included) collapse to a single space and the
/// result is trimmed, so blank-line runs disappear with them. When
/// `max_length` is set (and non-zero) and the text is longer, it is cut at the
/// last space if that space sits past 80% of the limit, otherwise hard-cut at
/// the limit, and `...` is appended. Lengths count characters, not bytes.
pub fn clean_text_for_prompt(text: &str, max_length: Option<usize>) -> String {
    let cleaned = WHITESPACE_RUN.replace_all(text, " ").trim().to_string();

    let Some(max_length) = max_length.filter(|max| *max > 0) else {
        return cleaned;
    };
    if cleaned.chars().count() <= max_length {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(max_length).collect();
    let boundary = truncated
        .rfind(' ')
        .filter(|byte_idx| truncated[..*byte_idx].chars().count() as f64 > max_length as f64 * WORD_BOUNDARY_RATIO);

    match boundary {
        Some(byte_idx) => format!("{}...", &truncated[..byte_idx]),
        None => format!("{}...", truncated),
    }
}
