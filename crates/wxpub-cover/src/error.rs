//! Error types for cover fetch and upload.

/// Error from Unsplash or Qiniu operations.
#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Response lacks a field the caller needs.
    #[error("response is missing {0}")]
    MissingField(&'static str),
}
