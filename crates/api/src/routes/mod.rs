pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Video uploads exceed axum's 2 MiB default body limit.
const MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

/// Build the application route tree.
///
/// Route hierarchy (paths keep the original contract's trailing slashes):
///
/// ```text
/// /                                 upload page
/// /analyze-video/                   run extraction + inference (POST)
/// /download-frames/                 zip of all extracted frames
/// /get-predictions/{frame_name}/    stored predictions for one frame
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/analyze-video/", post(handlers::analysis::analyze_video))
        .route("/download-frames/", get(handlers::frames::download_frames))
        .route(
            "/get-predictions/{frame_name}/",
            get(handlers::predictions::get_predictions),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
