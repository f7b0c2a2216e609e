use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use extraction::{DEFAULT_PDF_STRATEGIES, DEFAULT_URL_STRATEGIES};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    /// Classifier confidence below this escalates to the LLM fact-checker
    pub confidence_threshold: f32,

    /// Local weights directory (`config.json`, `tokenizer.json`, `model.safetensors`)
    pub model_dir: PathBuf,
    /// Fine-tuned safetensors applied on top of the base weights, if present
    pub fine_tuned_model_path: PathBuf,
    /// Hub repository downloaded when `model_dir` is empty
    pub base_model_id: String,

    /// Missing key is not fatal at startup; LLM endpoints answer 503 instead
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_api_url: String,
    pub llm_timeout: Duration,

    pub fetch_timeout: Duration,
    pub url_strategies: Vec<String>,
    pub pdf_strategies: Vec<String>,

    pub context_capacity: usize,
    pub context_ttl: Duration,

    pub progress_log_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let confidence_threshold: f32 = parse_var("CONFIDENCE_THRESHOLD", 0.70)?;
        if !(0.0..=1.0).contains(&confidence_threshold) {
            anyhow::bail!("CONFIDENCE_THRESHOLD must be between 0 and 1");
        }

        let context_capacity: usize = parse_var("CONTEXT_CAPACITY", 1024)?;
        if context_capacity == 0 {
            anyhow::bail!("CONTEXT_CAPACITY must be at least 1");
        }

        Ok(Self {
            port: parse_var("PORT", 5000)?,
            confidence_threshold,
            model_dir: env::var("MODEL_DIR")
                .unwrap_or_else(|_| "model/distilbert".to_string())
                .into(),
            fine_tuned_model_path: env::var("FINE_TUNED_MODEL_PATH")
                .unwrap_or_else(|_| "model/sanity_model.safetensors".to_string())
                .into(),
            base_model_id: env::var("BASE_MODEL_ID")
                .unwrap_or_else(|_| "distilbert-base-uncased".to_string()),
            groq_api_key: env::var(llm_client::API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty()),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| llm_client::DEFAULT_MODEL.to_string()),
            groq_api_url: env::var("GROQ_API_URL")
                .unwrap_or_else(|_| llm_client::GROQ_BASE_URL.to_string()),
            llm_timeout: Duration::from_secs(parse_var("LLM_TIMEOUT_SECS", 30)?),
            fetch_timeout: Duration::from_secs(parse_var("FETCH_TIMEOUT_SECS", 10)?),
            url_strategies: list_var("URL_STRATEGIES", DEFAULT_URL_STRATEGIES),
            pdf_strategies: list_var("PDF_STRATEGIES", DEFAULT_PDF_STRATEGIES),
            context_capacity,
            context_ttl: Duration::from_secs(parse_var("CONTEXT_TTL_SECS", 3600)?),
            progress_log_path: env::var("PROGRESS_LOG_PATH")
                .unwrap_or_else(|_| "dev_progress.txt".to_string())
                .into(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()).into(),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid {}", name, std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list; unset or blank falls back to `default`.
fn list_var(name: &str, default: &[&str]) -> Vec<String> {
    let items: Vec<String> = env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let value: u64 = parse_var("SANITY_TEST_UNSET_NUMBER", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("SANITY_TEST_BAD_NUMBER", "ten");
        let err = parse_var::<u16>("SANITY_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("SANITY_TEST_BAD_NUMBER"));
    }

    #[test]
    fn test_list_var_splits_and_defaults() {
        env::set_var("SANITY_TEST_STRATEGIES", " Paragraphs , readability,, ");
        assert_eq!(
            list_var("SANITY_TEST_STRATEGIES", &["x"]),
            vec!["paragraphs".to_string(), "readability".to_string()]
        );
        assert_eq!(list_var("SANITY_TEST_UNSET_LIST", &["a", "b"]), vec!["a", "b"]);
    }
}
