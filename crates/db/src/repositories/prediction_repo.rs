//! Repository for the `predictions` table.

use sqlx::PgPool;

use crate::models::prediction::{CreatePrediction, Prediction};

/// Column list for predictions queries.
const COLUMNS: &str = "id, frame, x, y, width, height, class_label, confidence, created_at";

/// Provides insert and lookup operations for predictions.
pub struct PredictionRepo;

impl PredictionRepo {
    /// Insert a new prediction, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePrediction,
    ) -> Result<Prediction, sqlx::Error> {
        let query = format!(
            "INSERT INTO predictions
                (frame, x, y, width, height, class_label, confidence)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prediction>(&query)
            .bind(&input.frame)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.class_label)
            .bind(input.confidence)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of predictions sequentially, returning the created rows.
    pub async fn create_batch(
        pool: &PgPool,
        inputs: &[CreatePrediction],
    ) -> Result<Vec<Prediction>, sqlx::Error> {
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(Self::create(pool, input).await?);
        }
        Ok(created)
    }

    /// List all predictions recorded for a frame identifier, in insertion
    /// order. Returns an empty vec when no rows match.
    pub async fn list_by_frame(
        pool: &PgPool,
        frame: &str,
    ) -> Result<Vec<Prediction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predictions
             WHERE frame = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Prediction>(&query)
            .bind(frame)
            .fetch_all(pool)
            .await
    }
}
