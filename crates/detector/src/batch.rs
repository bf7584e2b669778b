//! Sequential batch inference over extracted frame files.

use std::path::PathBuf;

use crate::client::{DetectorApi, DetectorApiError};

/// Inference outcome for one frame file: the parsed prediction payload, or
/// `None` when the API rejected the upload.
#[derive(Debug, Clone)]
pub struct FrameDetection {
    pub path: PathBuf,
    pub payload: Option<serde_json::Value>,
}

/// Upload each existing image to the detection API, one at a time, strictly
/// in input order.
///
/// Files that cannot be read at call time are logged and omitted from the
/// result. A non-2xx API response records `payload: None` for that file and
/// the batch continues; a transport-level failure aborts the whole batch.
/// No retries.
pub async fn run_inference(
    api: &DetectorApi,
    image_paths: &[PathBuf],
) -> Result<Vec<FrameDetection>, DetectorApiError> {
    let mut results = Vec::with_capacity(image_paths.len());

    for path in image_paths {
        if !path.exists() {
            tracing::warn!(image = %path.display(), "Image file not found, skipping");
            continue;
        }

        let image = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(image = %path.display(), error = %err, "Failed to read image, skipping");
                continue;
            }
        };

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("frame.jpg");

        match api.detect(file_name, image).await {
            Ok(payload) => {
                tracing::debug!(image = %path.display(), "Processed image");
                results.push(FrameDetection {
                    path: path.clone(),
                    payload: Some(payload),
                });
            }
            Err(DetectorApiError::Api { status, body }) => {
                tracing::warn!(
                    image = %path.display(),
                    status,
                    body = %body,
                    "Detection API rejected image"
                );
                results.push(FrameDetection {
                    path: path.clone(),
                    payload: None,
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(results)
}
