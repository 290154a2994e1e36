use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page interview question generator.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
