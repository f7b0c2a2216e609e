//! Escalation of uncertain classifications to the LLM fact-checker.

pub mod activities;
pub mod models;
pub mod parser;
pub mod prompts;

pub use activities::verify_article;
pub use models::VerificationResult;
pub use parser::{parse_verification_reply, ParsedVerdict};
pub use prompts::PromptTemplate;
