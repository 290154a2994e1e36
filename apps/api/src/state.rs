use std::sync::Arc;

use crate::config::Config;
use crate::indexing::Embedder;
use crate::llm_client::ChatModel;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Chat model behind the query engine. Default: Groq.
    pub llm: Arc<dyn ChatModel>,
    /// Embedding model used to build per-request indices. Default: Hugging Face.
    pub embedder: Arc<dyn Embedder>,
    pub sessions: SessionStore,
}
