//! Error types for track rendering.

use thiserror::Error;

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while composing or persisting the map image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read basemap file {path}: {message}")]
    Basemap { path: String, message: String },

    #[error("failed to write image: {0}")]
    ImageWrite(String),

    #[error("failed to open viewer: {0}")]
    Viewer(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
