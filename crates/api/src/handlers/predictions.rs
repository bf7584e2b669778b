//! Handler for the stored-predictions read path.

use axum::extract::{Path, State};
use axum::Json;

use framesight_db::models::prediction::PredictionOut;
use framesight_db::repositories::PredictionRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /get-predictions/{frame_name}/
///
/// Returns every stored prediction whose frame identifier exactly matches
/// the path segment, in insertion order. An unknown frame yields an empty
/// array, not an error; a storage fault surfaces as a 500 JSON error.
pub async fn get_predictions(
    State(state): State<AppState>,
    Path(frame_name): Path<String>,
) -> AppResult<Json<Vec<PredictionOut>>> {
    let rows = PredictionRepo::list_by_frame(&state.pool, &frame_name).await?;
    Ok(Json(rows.into_iter().map(PredictionOut::from).collect()))
}
