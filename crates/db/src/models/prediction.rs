//! Prediction model and DTOs.

use framesight_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `predictions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Prediction {
    pub id: DbId,
    pub frame: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class_label: String,
    pub confidence: f64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new prediction.
#[derive(Debug, Clone)]
pub struct CreatePrediction {
    pub frame: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class_label: String,
    pub confidence: f64,
}

/// Public shape returned by the predictions endpoint: the bounding box,
/// label, and confidence only.
#[derive(Debug, Serialize)]
pub struct PredictionOut {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class_label: String,
    pub confidence: f64,
}

impl From<Prediction> for PredictionOut {
    fn from(row: Prediction) -> Self {
        Self {
            x: row.x,
            y: row.y,
            width: row.width,
            height: row.height,
            class_label: row.class_label,
            confidence: row.confidence,
        }
    }
}
