use thiserror::Error;

/// Errors returned by the `YouTube` Data API client.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request budget for the current window is exhausted
    /// (`quotaExceeded`, `rateLimitExceeded`, HTTP 429).
    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-2xx response, with the API's error message when present.
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl YouTubeError {
    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, YouTubeError::QuotaExceeded(_))
    }
}
