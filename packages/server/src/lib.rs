// Sanity - fake news detection API core
//
// Classifies news articles with a local DistilBERT model and escalates
// low-confidence results to an LLM fact-checker. Follow-up questions about a
// classified article are answered from a short-lived in-memory context.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
