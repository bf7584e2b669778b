//! Handler for the video analysis endpoint.

use axum::extract::{Multipart, State};
use axum::Json;

use framesight_pipeline::FrameAnalysis;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /analyze-video/
///
/// Accepts a multipart form with a required `video_file` field, runs the
/// full extraction + inference pipeline over the upload, and returns one
/// `{frame, result}` entry per sampled frame, in decode order. `result` is
/// the raw detection payload, or `null` when the API rejected that frame.
pub async fn analyze_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Vec<FrameAnalysis>>> {
    let mut video: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "video_file" => {
                let file_name = field.file_name().unwrap_or("upload.mp4").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                video = Some((file_name, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) = video
        .ok_or_else(|| AppError::BadRequest("Missing required 'video_file' field".into()))?;

    tracing::info!(file_name = %file_name, bytes = data.len(), "Received video for analysis");

    // One run at a time: the frames directory is shared across runs.
    let _guard = state.frames_lock.lock().await;

    let results = state.pipeline.analyze(&file_name, &data).await?;
    Ok(Json(results))
}
