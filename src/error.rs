//! Error types for SEO generation and thumbnail editing.

use std::time::Duration;

/// Errors that can occur while talking to the Gemini gateway.
#[derive(Debug, thiserror::Error)]
pub enum TubeRankError {
    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by the gateway.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay suggested by the gateway's `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The gateway answered but carried no usable payload.
    #[error("empty response: {0}")]
    EmptyResponse(String),

    /// The edit response contained only text parts, no inline image.
    #[error("no image data in response, the model may have returned text only")]
    NoImage,

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// The generated text did not match the expected record shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (e.g., saving a file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TubeRankError {
    /// Returns true if a manual resubmission is likely to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Network(_))
    }

    /// Returns the suggested resubmission delay, if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            Self::Network(_) => Some(Duration::from_secs(2)),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, TubeRankError>;
