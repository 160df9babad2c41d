//! Client error types.

use mathink_renderer::RenderError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when talking to the remote services.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API base URL provided is invalid.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// JSON parsing failed.
    #[error("failed to parse service response: {0}")]
    Json(#[from] serde_json::Error),

    /// The drawing could not be exported for upload.
    #[error("export failed: {0}")]
    Export(#[from] RenderError),

    /// A request is already running for this screen.
    #[error("a request is already in progress")]
    InProgress,
}

impl ClientError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => {
                "The request timed out. Please try again.".to_string()
            }
            Self::Http(e) if e.is_connect() => {
                "Could not reach the server. Check your connection.".to_string()
            }
            Self::Status { status, .. } => format!("Request failed with status code {status}"),
            Self::Export(RenderError::EmptyInput) => "Draw an equation first.".to_string(),
            other => other.to_string(),
        }
    }
}
