mod config;
mod errors;
mod extraction;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::dictionary::SkillDictionary;
use crate::scoring::engine::ScoreEngine;
use crate::scoring::recommend::VideoCatalog;
use crate::scoring::similarity::StaticModelEmbedder;
use crate::scoring::skills::{NoEntityRecognizer, SkillExtractor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS score API v{}", env!("CARGO_PKG_VERSION"));

    // Load the embedding model once; downloading from the hub is blocking I/O.
    let model_name = config.embedding_model.clone();
    let hf_token = config.hf_token.clone();
    let embedder = tokio::task::spawn_blocking(move || {
        StaticModelEmbedder::load(&model_name, hf_token.as_deref())
    })
    .await?
    .with_context(|| format!("Failed to load embedding model '{}'", config.embedding_model))?;
    info!("Embedding model loaded: {}", embedder.model_name());

    let dictionary = SkillDictionary::technical()?;
    info!(
        "Skill dictionary initialized ({} categories)",
        dictionary.categories().len()
    );

    let engine = ScoreEngine::new(
        dictionary,
        SkillExtractor::new(Box::new(NoEntityRecognizer)),
        Box::new(embedder),
        VideoCatalog::interview_prep(),
    );

    let state = AppState {
        config: config.clone(),
        engine: Arc::new(engine),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}
