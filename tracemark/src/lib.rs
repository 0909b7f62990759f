//! tracemark - Handwriting trace scoring
//!
//! Scores a freehand drawing of a glyph or word against the same text
//! rendered from a font. Both are normalized into a common square frame,
//! the rendered text is thinned to its skeleton, and distance fields in
//! both directions give a 0-100 accuracy and a pass/fail verdict.
//!
//! # Overview
//!
//! - Image I/O (PNG, base64 data URLs)
//! - Reference rendering (font cache, fallback font, auto-fit)
//! - Binary morphology and connectivity-preserving thinning
//! - Euclidean and chamfer distance fields
//! - Normalization and scoring
//!
//! # Example
//!
//! ```no_run
//! let png = std::fs::read("drawing.png")?;
//! let outcome = tracemark::score(&png, "அ", "fonts/NotoSansTamil-Regular.ttf", 256);
//! println!("{:.1}% correct={}", outcome.accuracy_percent, outcome.is_correct);
//! # Ok::<(), std::io::Error>(())
//! ```

// Re-export core types (primary data structures used everywhere)
pub use tracemark_core::*;

// Scoring entry points
pub use tracemark_score::{
    ScoreOptions, ScoreOutcome, ScoreReport, ScoreResult, Scorer, ScoringError, ScoringResult,
    score, score_data_url, score_with_options,
};

// Re-export domain crates as modules to avoid name conflicts
pub use tracemark_io as io;
pub use tracemark_morph as morph;
pub use tracemark_region as region;
pub use tracemark_render as render;
pub use tracemark_score as scoring;
pub use tracemark_transform as transform;
