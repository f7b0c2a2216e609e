//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container passed to every
//! route. External services sit behind trait objects so tests can swap in
//! the mocks from `test_dependencies`.

use extraction::TextResolver;
use std::sync::Arc;

use crate::domains::classification::ConfidenceGate;
use crate::domains::conversation::ContextStore;
use crate::kernel::{BaseChatModel, BaseClassifier, ProgressLog};

/// Server dependencies accessible to routes and activities
#[derive(Clone)]
pub struct ServerDeps {
    pub resolver: Arc<TextResolver>,
    pub classifier: Arc<dyn BaseClassifier>,
    pub chat: Arc<dyn BaseChatModel>,
    pub contexts: Arc<ContextStore>,
    pub gate: ConfidenceGate,
    pub progress: Arc<ProgressLog>,
}

impl ServerDeps {
    pub fn new(
        resolver: Arc<TextResolver>,
        classifier: Arc<dyn BaseClassifier>,
        chat: Arc<dyn BaseChatModel>,
        contexts: Arc<ContextStore>,
        gate: ConfidenceGate,
        progress: Arc<ProgressLog>,
    ) -> Self {
        Self {
            resolver,
            classifier,
            chat,
            contexts,
            gate,
            progress,
        }
    }
}
