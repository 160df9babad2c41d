//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering and export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Export requested for a drawing without strokes.
    #[error("Nothing to export: the drawing has no strokes")]
    EmptyInput,

    /// The rendered surface could not be encoded.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// An export for this drawing is already in flight.
    #[error("An export is already in progress")]
    Busy,

    /// A stroke color could not be parsed.
    #[error("Invalid color {color:?}: {reason}")]
    InvalidColor {
        /// The offending color string.
        color: String,
        /// Parser message.
        reason: String,
    },

    /// Surface allocation failed.
    #[error("Surface error: {0}")]
    Surface(String),

    /// No suitable execution context for the requested operation.
    #[error("No rendering backend available: {0}")]
    NoBackend(String),

    /// Input image could not be loaded.
    #[error("Failed to load resource: {0}")]
    Resource(String),
}
