use anyhow::Context;
use radha::api::{self, app_state::AppState};
use radha::config::loader::ConfigLoader;
use radha::models::ResponderTables;
use radha::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use radha::services::{
    ImageEmotionDecoder, create_emotion_classifier, create_response_chooser, create_text_analyzer,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);
    ConfigLoader::validate(&config).context("invalid configuration")?;

    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let tables = match &config.responder.tables_path {
        Some(path) => {
            info!("Loading responder tables from {}", path.display());
            ResponderTables::load(path)?
        }
        None => ResponderTables::builtin(),
    };
    info!(
        "Responder tables loaded: {} reflections, {} emotions, {} patterns",
        tables.reflections.len(),
        tables.emotions.len(),
        tables.patterns.len()
    );

    let chooser = create_response_chooser(config.responder.seed);
    let analyzer = create_text_analyzer(&tables, chooser)?;
    info!("Text analyzer initialized");

    let classifier = create_emotion_classifier(&config.classifier)?;
    let camera = ImageEmotionDecoder::new(Arc::from(classifier));
    info!(
        "Emotion classifier initialized (backend: {})",
        camera.backend_name()
    );

    let metrics = Arc::new(AppMetrics::default());
    let observability_state = Arc::new(
        ObservabilityState::new(env!("CARGO_PKG_VERSION").to_string(), metrics.clone())
            .with_components(camera.backend_name(), analyzer.responder().rule_count()),
    );

    let app_state = AppState::new(analyzer, camera, metrics);
    let router = create_observability_router(observability_state)
        .merge(api::create_router(app_state, config.server.max_request_size));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
