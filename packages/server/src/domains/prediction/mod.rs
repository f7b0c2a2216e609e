//! End-to-end prediction: resolve input, classify, escalate, remember.

pub mod activities;

pub use activities::{run_prediction, PredictionError, PredictionOutcome};
