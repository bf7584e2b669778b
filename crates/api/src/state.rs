use std::sync::Arc;

use framesight_pipeline::AnalysisPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: framesight_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The analysis pipeline with its injected detection endpoint.
    pub pipeline: Arc<AnalysisPipeline>,
    /// Serializes access to the shared frames directory and archive file.
    /// Analysis runs and archive builds both write under the same paths.
    pub frames_lock: Arc<tokio::sync::Mutex<()>>,
}
