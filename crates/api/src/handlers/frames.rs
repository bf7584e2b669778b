//! Handler for the frame archive download.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use framesight_core::archive::{build_archive, ArchiveError};
use framesight_core::storage::ARCHIVE_FILE_NAME;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /download-frames/
///
/// Packages every extracted frame into `frames.zip` in the storage root and
/// streams it back as an attachment. Returns a plain-text 404 when no
/// frames have been extracted yet.
pub async fn download_frames(State(state): State<AppState>) -> AppResult<Response> {
    let frames_dir = state.pipeline.storage().frames_dir();
    let archive_path = state.pipeline.storage().archive_path();

    // Hold the lock across build + open so a concurrent analysis run cannot
    // swap frames mid-archive.
    let _guard = state.frames_lock.lock().await;

    let built = tokio::task::spawn_blocking({
        let archive_path = archive_path.clone();
        move || build_archive(&frames_dir, &archive_path)
    })
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    match built {
        Ok(_) => {}
        Err(ArchiveError::MissingFramesDir(_)) => {
            return Ok((StatusCode::NOT_FOUND, "No frames found.").into_response());
        }
        Err(err) => return Err(AppError::InternalError(err.to_string())),
    }

    let file = tokio::fs::File::open(&archive_path)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let size = file
        .metadata()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .len();
    let stream = ReaderStream::new(file);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{ARCHIVE_FILE_NAME}\""),
        )
        .body(Body::from_stream(stream))
        .unwrap())
}
