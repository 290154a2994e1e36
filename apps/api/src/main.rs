mod config;
mod errors;
mod extraction;
mod generation;
mod indexing;
mod llm_client;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::indexing::HuggingFaceEmbedder;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing provider keys)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Question API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = GroqClient::new(&config)?;
    info!("LLM client initialized (model: {})", config.llm_model);

    // Initialize embedding client
    let embedder = HuggingFaceEmbedder::new(&config)?;
    info!("Embedding client initialized (model: {})", config.embedding_model);

    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        embedder: Arc::new(embedder),
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
