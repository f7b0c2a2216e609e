// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use extraction::{HttpFetcher, TextResolver};
use sanity_core::{
    domains::{classification::ConfidenceGate, conversation::ContextStore},
    kernel::{
        backend_log_appender, ClassifierSettings, DistilBertClassifier, GroqChatModel, ProgressLog,
        ServerDeps,
    },
    server::build_app,
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging: console plus a rolling backend log file
    let file_appender = backend_log_appender(&config.log_dir)?;
    let (file_writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sanity_core=debug,extraction=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    tracing::info!(log_dir = %config.log_dir.display(), "Starting Sanity API");

    let progress = Arc::new(ProgressLog::new(&config.progress_log_path));

    let fetcher = Arc::new(
        HttpFetcher::new(config.fetch_timeout).context("Failed to build HTTP fetcher")?,
    );
    let resolver = TextResolver::from_names(fetcher, &config.url_strategies, &config.pdf_strategies)
        .context("Invalid extraction strategy configuration")?;
    tracing::info!(
        url = ?resolver.url_strategy_names(),
        pdf = ?resolver.pdf_strategy_names(),
        "Extraction strategies configured"
    );

    // Model loads lazily on first use
    let classifier = DistilBertClassifier::new(
        ClassifierSettings {
            model_dir: config.model_dir.clone(),
            fine_tuned_path: config.fine_tuned_model_path.clone(),
            base_model_id: config.base_model_id.clone(),
        },
        Some(progress.clone()),
    );

    let chat = GroqChatModel::new(
        config.groq_api_key.clone(),
        &config.groq_api_url,
        config.groq_model.clone(),
        config.llm_timeout,
    );

    let server_deps = ServerDeps::new(
        Arc::new(resolver),
        Arc::new(classifier),
        Arc::new(chat),
        Arc::new(ContextStore::new(config.context_capacity, config.context_ttl)),
        ConfidenceGate::new(config.confidence_threshold),
        progress.clone(),
    );

    let app = build_app(server_deps);

    progress.record_or_warn("Starting server.");

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
