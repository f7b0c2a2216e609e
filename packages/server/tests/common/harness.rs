//! Test harness wiring the real router to mock services.
//!
//! Every harness gets its own context store and a progress log inside a
//! temporary directory, so tests never share state.

use extraction::testing::MockUrlStrategy;
use extraction::TextResolver;
use sanity_core::domains::classification::ConfidenceGate;
use sanity_core::domains::conversation::ContextStore;
use sanity_core::kernel::{MockChatModel, MockClassifier, ProgressLog, ServerDeps};
use sanity_core::server::build_app;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::ApiClient;

pub const MOCK_URL_TEXT: &str = "Article fetched from the web.";

pub struct TestHarness {
    pub client: ApiClient,
    pub chat: Arc<MockChatModel>,
    pub classifier: Arc<MockClassifier>,
    pub contexts: Arc<ContextStore>,
    pub progress_path: PathBuf,
    // Keep the directory alive for the test
    _tmp: TempDir,
}

impl TestHarness {
    /// Confident classifier and a default chat reply.
    pub fn new() -> Self {
        Self::with(MockClassifier::confident_real(), MockChatModel::new())
    }

    pub fn with(classifier: MockClassifier, chat: MockChatModel) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let tmp = TempDir::new().expect("Failed to create temp dir");
        let progress_path = tmp.path().join("logs").join("dev_progress.txt");

        let chat = Arc::new(chat);
        let classifier = Arc::new(classifier);
        let contexts = Arc::new(ContextStore::default());

        let resolver = TextResolver::new(
            vec![Arc::new(MockUrlStrategy::returning("paragraphs", MOCK_URL_TEXT))],
            Vec::new(),
        );

        let deps = ServerDeps::new(
            Arc::new(resolver),
            classifier.clone(),
            chat.clone(),
            contexts.clone(),
            ConfidenceGate::new(0.70),
            Arc::new(ProgressLog::new(&progress_path)),
        );

        Self {
            client: ApiClient::new(build_app(deps)),
            chat,
            classifier,
            contexts,
            progress_path,
            _tmp: tmp,
        }
    }
}
