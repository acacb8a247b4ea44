/// Error types for Projects API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for Projects API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
