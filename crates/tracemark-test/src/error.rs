//! Errors from the test harness

use std::path::PathBuf;
use thiserror::Error;

/// Harness failures, as opposed to failed checks
#[derive(Debug, Error)]
pub enum TestError {
    /// An output image could not be written
    #[error("cannot write {path:?}: {message}")]
    ImageWrite { path: PathBuf, message: String },

    /// A font a test needs is not available
    #[error("font unavailable: {0}")]
    MissingFont(String),

    /// A synthetic drawing could not be built
    #[error("cannot build drawing: {0}")]
    Synth(String),
}

/// Result type for harness operations
pub type TestResult<T> = Result<T, TestError>;
