//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod distilbert;
pub mod logging;
pub mod progress_log;
pub mod test_dependencies;
pub mod traits;

pub use ai::GroqChatModel;
pub use deps::ServerDeps;
pub use distilbert::{ClassifierSettings, DistilBertClassifier};
pub use logging::backend_log_appender;
pub use progress_log::ProgressLog;
pub use test_dependencies::{MockChatModel, MockClassifier};
pub use traits::*;
