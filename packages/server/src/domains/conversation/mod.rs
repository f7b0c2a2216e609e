//! Follow-up questions about classified articles, and general questions.

pub mod activities;
pub mod context_store;

pub use activities::{answer_question, build_question_prompt, QuestionFlow, QuestionRequest};
pub use context_store::{ArticleContext, ContextIdInUse, ContextLookup, ContextStore};
