//! Errors from reading and writing images

use thiserror::Error;

/// Image I/O failures
///
/// The variants separate "not a format we read" from "claims to be PNG
/// but is broken", which callers report differently.
#[derive(Error, Debug)]
pub enum IoError {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A PNG layout this crate does not read
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A malformed data URL or base64 payload
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The PNG decoder rejected the stream
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The PNG encoder failed
    #[error("encode error: {0}")]
    EncodeError(String),

    /// A raster operation failed
    #[error(transparent)]
    Core(#[from] tracemark_core::Error),
}

/// Result type for image I/O
pub type IoResult<T> = Result<T, IoError>;
