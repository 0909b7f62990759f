//! Error types for tracemark-render

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering reference text
#[derive(Debug, Error)]
pub enum RenderError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tracemark_core::Error),

    /// A font file could not be read or parsed
    #[error("failed to load font {path:?}: {message}")]
    FontLoad { path: PathBuf, message: String },

    /// Neither the requested font nor a system fallback is available
    #[error("no fallback font available on this system")]
    NoFallbackFont,

    /// Neither the requested font nor the default font has glyphs for the
    /// text
    #[error("no glyphs for {text:?} in {font}")]
    MissingGlyphs { text: String, font: String },

    /// The text could not be laid out or drawn
    #[error("rasterization failed: {0}")]
    Raster(String),

    /// The text produced no ink at any size
    #[error("text {0:?} renders no ink")]
    EmptyText(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
