pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Session API: upload + extraction
        .route(
            "/api/v1/sessions",
            post(session::handle_create_session).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        // Generation API
        .route(
            "/api/v1/sessions/:id/questions",
            post(generation::handle_generate_questions),
        )
        .route(
            "/api/v1/sessions/:id/questions/download",
            get(generation::handle_download_questions),
        )
        .with_state(state)
}
