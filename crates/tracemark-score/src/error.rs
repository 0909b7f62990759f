//! Error types for tracemark-score
//!
//! Decoding and rendering errors are sorted into the scoring taxonomy on
//! conversion: inputs that cannot be scored become
//! [`ScoringError::UnsupportedInputFormat`] or [`ScoringError::EmptyInput`]
//! (reported as a zero score), undecodable payloads become
//! [`ScoringError::MalformedEncodedImage`].

use thiserror::Error;
use tracemark_io::IoError;
use tracemark_render::RenderError;

/// Errors that can occur while scoring a drawing
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The drawing decoded, but cannot be scored (e.g. no alpha channel)
    #[error("unsupported input format: {0}")]
    UnsupportedInputFormat(String),

    /// Nothing to compare: blank canvas or text without ink
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// The payload is not a decodable image
    #[error("malformed encoded image: {0}")]
    MalformedEncodedImage(String),

    /// The masks being compared differ in size
    #[error("mask size mismatch: {}x{} vs {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid scoring options
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Image I/O error
    #[error("I/O error: {0}")]
    Io(#[source] IoError),

    /// Reference rendering error
    #[error("render error: {0}")]
    Render(#[source] RenderError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] tracemark_morph::MorphError),

    /// Region processing error
    #[error("region error: {0}")]
    Region(#[from] tracemark_region::RegionError),

    /// Transform error
    #[error("transform error: {0}")]
    Transform(#[from] tracemark_transform::TransformError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tracemark_core::Error),
}

impl ScoringError {
    /// True for inputs that are reported as a zero score rather than a
    /// failure
    pub fn is_scoring_degeneracy(&self) -> bool {
        matches!(
            self,
            ScoringError::UnsupportedInputFormat(_) | ScoringError::EmptyInput(_)
        )
    }
}

impl From<IoError> for ScoringError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::UnsupportedFormat(msg) => ScoringError::UnsupportedInputFormat(msg),
            IoError::DecodeError(msg) | IoError::InvalidData(msg) => {
                ScoringError::MalformedEncodedImage(msg)
            }
            other => ScoringError::Io(other),
        }
    }
}

impl From<RenderError> for ScoringError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::EmptyText(text) => {
                ScoringError::EmptyInput(format!("text {:?} renders no ink", text))
            }
            other => ScoringError::Render(other),
        }
    }
}

/// Result type for scoring operations
pub type ScoringResult<T> = Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_sorted() {
        let e: ScoringError = IoError::DecodeError("bad crc".into()).into();
        assert!(matches!(e, ScoringError::MalformedEncodedImage(_)));
        assert!(!e.is_scoring_degeneracy());

        let e: ScoringError = IoError::UnsupportedFormat("16-bit gray".into()).into();
        assert!(e.is_scoring_degeneracy());

        let e: ScoringError = IoError::EncodeError("x".into()).into();
        assert!(matches!(e, ScoringError::Io(_)));
    }

    #[test]
    fn test_render_errors_sorted() {
        let e: ScoringError = RenderError::EmptyText(" ".into()).into();
        assert!(matches!(e, ScoringError::EmptyInput(_)));
        let e: ScoringError = RenderError::NoFallbackFont.into();
        assert!(matches!(e, ScoringError::Render(_)));
        assert!(!e.is_scoring_degeneracy());
        let e: ScoringError = RenderError::MissingGlyphs {
            text: "x".into(),
            font: "f.ttf".into(),
        }
        .into();
        assert!(matches!(e, ScoringError::Render(_)));
        assert!(!e.is_scoring_degeneracy());
    }
}
