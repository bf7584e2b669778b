//! Home page handler.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("index.html");

/// GET / -- the video upload form.
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}
