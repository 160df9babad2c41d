//! Error types for drawing operations.

use thiserror::Error;

/// Result type for drawing operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in drawing operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Stroke width was zero, negative or not finite.
    #[error("Invalid stroke width: {0}")]
    InvalidWidth(f32),

    /// Stroke color string was empty.
    #[error("Invalid stroke color: {0:?}")]
    InvalidColor(String),

    /// Drawing or gesture log serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
