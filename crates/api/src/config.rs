use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Most fields have defaults suitable for local development; the detection
/// API endpoint and credential must always be provided — they are never
/// embedded in code.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300` — an analysis run
    /// blocks its request for the full extraction + inference duration).
    pub request_timeout_secs: u64,
    /// Root directory for uploads, frames, and archives.
    pub storage_root: PathBuf,
    /// Full detection model endpoint URL.
    pub detector_url: String,
    /// Detection API query credential.
    pub detector_api_key: String,
    /// Save one frame every this many decoded frames.
    pub sampling_interval: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `8000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `300`                      |
    /// | `STORAGE_ROOT`            | `storage`                  |
    /// | `DETECTOR_API_URL`        | — (required)               |
    /// | `DETECTOR_API_KEY`        | — (required)               |
    /// | `FRAME_SAMPLING_INTERVAL` | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_root =
            PathBuf::from(std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".into()));

        let detector_url =
            std::env::var("DETECTOR_API_URL").expect("DETECTOR_API_URL must be set");

        let detector_api_key =
            std::env::var("DETECTOR_API_KEY").expect("DETECTOR_API_KEY must be set");

        let sampling_interval: u32 = std::env::var("FRAME_SAMPLING_INTERVAL")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("FRAME_SAMPLING_INTERVAL must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage_root,
            detector_url,
            detector_api_key,
            sampling_interval,
        }
    }
}
