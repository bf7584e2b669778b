//! REST API client for the hosted detection endpoint.
//!
//! The detection service accepts one image per request as a multipart
//! `file` part, authenticated by an `api_key` query parameter, and returns
//! a JSON prediction payload.

/// HTTP client for a single detection endpoint.
pub struct DetectorApi {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Errors from the detection API layer.
#[derive(Debug, thiserror::Error)]
pub enum DetectorApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The detection API returned a non-2xx status code.
    #[error("detection API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl DetectorApi {
    /// Create a new API client for a detection endpoint.
    ///
    /// * `api_url` - Full model endpoint URL, e.g.
    ///   `https://detect.example.com/traffic/2`.
    /// * `api_key` - Query credential appended to every request.
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Submit one image for detection and return the parsed JSON payload.
    ///
    /// Uses the transport's default timeout; a hanging remote call blocks
    /// until the connection gives up.
    pub async fn detect(
        &self,
        file_name: &str,
        image: Vec<u8>,
    ) -> Result<serde_json::Value, DetectorApiError> {
        let part = reqwest::multipart::Part::bytes(image).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("api_key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`DetectorApiError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DetectorApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DetectorApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, DetectorApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<serde_json::Value>().await?)
    }
}
