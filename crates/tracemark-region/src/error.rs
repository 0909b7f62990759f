//! Error types for tracemark-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tracemark_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Mask without foreground pixels
    #[error("empty mask: no foreground pixels to measure from")]
    EmptyMask,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
