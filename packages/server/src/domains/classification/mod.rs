//! Article classification and the confidence gate.

pub mod activities;
pub mod gate;
pub mod models;

pub use activities::classify_article;
pub use gate::ConfidenceGate;
pub use models::{InferenceResult, Probabilities};
