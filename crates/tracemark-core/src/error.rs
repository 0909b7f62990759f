//! Error types for tracemark-core

use thiserror::Error;

/// Errors from raster containers and their operations
#[derive(Error, Debug)]
pub enum Error {
    /// A zero width or height
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel coordinates outside the image
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two images that must match in size do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The operation is not defined at this depth
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// An argument out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The image lacks something the operation needs, such as alpha
    #[error("operation not supported: {0}")]
    NotSupported(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
