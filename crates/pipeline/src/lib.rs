//! End-to-end video analysis pipeline.
//!
//! One run sequences: persist the upload → extract sampled frames → submit
//! each frame to the remote detection API → persist the parsed detections →
//! shape the per-frame response list. Every step blocks the run for its
//! full duration; there is no parallel fan-out and no retry.

use std::path::Path;

use serde::Serialize;

use framesight_core::frames::{self, FrameError};
use framesight_core::storage::StorageLayout;
use framesight_db::models::prediction::CreatePrediction;
use framesight_db::repositories::PredictionRepo;
use framesight_db::DbPool;
use framesight_detector::{run_inference, DetectorApi, DetectorApiError, FrameDetection};

/// Injected pipeline configuration.
///
/// The detection endpoint and credential arrive from the environment at
/// startup; nothing is hardcoded in orchestration logic.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Full detection model endpoint URL.
    pub detector_url: String,
    /// Query credential for the detection API.
    pub detector_api_key: String,
    /// Save one frame every this many decoded frames.
    pub sampling_interval: u32,
}

/// One entry of the analysis response: a frame's base filename paired with
/// the raw prediction payload, or `null` when the API rejected the upload.
#[derive(Debug, Clone, Serialize)]
pub struct FrameAnalysis {
    pub frame: String,
    pub result: Option<serde_json::Value>,
}

/// Errors from a pipeline run, mapped to response codes at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to store uploaded video: {0}")]
    Storage(#[from] std::io::Error),

    #[error("frame extraction failed: {0}")]
    Extraction(#[from] FrameError),

    #[error("inference batch failed: {0}")]
    Inference(#[from] DetectorApiError),

    #[error("failed to persist predictions: {0}")]
    Database(#[from] sqlx::Error),
}

/// Orchestrates one analysis run per uploaded video.
pub struct AnalysisPipeline {
    config: PipelineConfig,
    storage: StorageLayout,
    api: DetectorApi,
    pool: DbPool,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig, storage: StorageLayout, pool: DbPool) -> Self {
        let api = DetectorApi::new(
            config.detector_url.clone(),
            config.detector_api_key.clone(),
        );
        Self {
            config,
            storage,
            api,
            pool,
        }
    }

    pub fn storage(&self) -> &StorageLayout {
        &self.storage
    }

    /// Run one full analysis over an uploaded video.
    ///
    /// The upload is stored under its basename in the storage root; a
    /// same-named upload silently overwrites the previous file.
    pub async fn analyze(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<Vec<FrameAnalysis>, PipelineError> {
        let video_path = self.storage.video_path(file_name);
        tokio::fs::create_dir_all(self.storage.root()).await?;
        tokio::fs::write(&video_path, data).await?;
        tracing::info!(
            video = %video_path.display(),
            bytes = data.len(),
            "Stored uploaded video"
        );

        let frame_paths = frames::extract_frames(
            &video_path,
            &self.storage.frames_dir(),
            self.config.sampling_interval,
        )
        .await?;

        let detections = run_inference(&self.api, &frame_paths).await?;

        self.persist_detections(&detections).await?;

        Ok(shape_response(detections))
    }

    /// Parse each successful payload into prediction rows and insert them,
    /// so the prediction read path reflects the run immediately.
    async fn persist_detections(
        &self,
        detections: &[FrameDetection],
    ) -> Result<(), PipelineError> {
        let mut rows = Vec::new();
        for detection in detections {
            let Some(payload) = &detection.payload else {
                continue;
            };
            rows.extend(parse_detections(&basename(&detection.path), payload));
        }

        if rows.is_empty() {
            return Ok(());
        }

        let created = PredictionRepo::create_batch(&self.pool, &rows).await?;
        tracing::info!(rows = created.len(), "Persisted predictions");
        Ok(())
    }
}

/// Project inference results into the response list, keyed by each frame's
/// base filename, preserving batch order.
fn shape_response(detections: Vec<FrameDetection>) -> Vec<FrameAnalysis> {
    detections
        .into_iter()
        .map(|d| FrameAnalysis {
            frame: basename(&d.path),
            result: d.payload,
        })
        .collect()
}

fn basename(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Parse a detection payload's `predictions` array into prediction rows.
///
/// Entries missing a bounding-box field, class, or confidence are skipped;
/// a payload without a `predictions` array yields no rows.
pub fn parse_detections(frame: &str, payload: &serde_json::Value) -> Vec<CreatePrediction> {
    let Some(entries) = payload.get("predictions").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            Some(CreatePrediction {
                frame: frame.to_string(),
                x: entry.get("x")?.as_f64()?,
                y: entry.get("y")?.as_f64()?,
                width: entry.get("width")?.as_f64()?,
                height: entry.get("height")?.as_f64()?,
                class_label: entry.get("class")?.as_str()?.to_string(),
                confidence: entry.get("confidence")?.as_f64()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_parse_detections_full_payload() {
        let payload = json!({
            "predictions": [
                {"x": 10.0, "y": 20.0, "width": 30.0, "height": 40.0,
                 "class": "car", "confidence": 0.92},
                {"x": 1.5, "y": 2.5, "width": 3.5, "height": 4.5,
                 "class": "truck", "confidence": 0.61},
            ],
            "time": 0.04,
        });

        let rows = parse_detections("frame_0.jpg", &payload);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frame, "frame_0.jpg");
        assert_eq!(rows[0].class_label, "car");
        assert!((rows[0].confidence - 0.92).abs() < 1e-9);
        assert_eq!(rows[1].class_label, "truck");
        assert!((rows[1].x - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_detections_skips_malformed_entries() {
        let payload = json!({
            "predictions": [
                {"x": 10.0, "y": 20.0, "width": 30.0, "height": 40.0,
                 "class": "car", "confidence": 0.9},
                {"x": 10.0, "y": 20.0, "class": "bus", "confidence": 0.8},
                {"x": "not a number", "y": 1.0, "width": 2.0, "height": 3.0,
                 "class": "bike", "confidence": 0.7},
            ],
        });

        let rows = parse_detections("frame_10.jpg", &payload);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class_label, "car");
    }

    #[test]
    fn test_parse_detections_without_predictions_array() {
        assert!(parse_detections("frame_0.jpg", &json!({"error": "bad image"})).is_empty());
        assert!(parse_detections("frame_0.jpg", &json!({"predictions": "nope"})).is_empty());
    }

    #[test]
    fn test_shape_response_preserves_order_and_nulls() {
        let detections = vec![
            FrameDetection {
                path: PathBuf::from("/data/frames/frame_0.jpg"),
                payload: Some(json!({"predictions": []})),
            },
            FrameDetection {
                path: PathBuf::from("/data/frames/frame_10.jpg"),
                payload: None,
            },
            FrameDetection {
                path: PathBuf::from("/data/frames/frame_20.jpg"),
                payload: Some(json!({"predictions": []})),
            },
        ];

        let shaped = shape_response(detections);
        let frames: Vec<&str> = shaped.iter().map(|r| r.frame.as_str()).collect();
        assert_eq!(frames, vec!["frame_0.jpg", "frame_10.jpg", "frame_20.jpg"]);
        assert!(shaped[0].result.is_some());
        assert!(shaped[1].result.is_none());
    }

    #[test]
    fn test_frame_analysis_serializes_null_result() {
        let entry = FrameAnalysis {
            frame: "frame_10.jpg".into(),
            result: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"frame": "frame_10.jpg", "result": null}));
    }
}
