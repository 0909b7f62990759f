//! tracemark-score - Handwriting trace scoring
//!
//! Compares a freehand drawing with reference text:
//!
//! 1. The drawing's ink (alpha above a threshold) and the rendered text are
//!    each cropped, scaled so the longer side spans 90% of an `N x N`
//!    canvas, and centered ([`normalize`])
//! 2. The reference is thinned to a one-pixel skeleton
//! 3. Distance fields of the skeleton and the drawing give precision and
//!    completeness, combined by geometric mean ([`scorer`])
//!
//! A final score of at least 0.5 passes.
//!
//! # Examples
//!
//! ```
//! use tracemark_score::{ScoreOptions, score_masks};
//! use tracemark_core::{Pix, PixelDepth};
//!
//! let mut pm = Pix::new(64, 64, PixelDepth::Bit1).unwrap().to_mut();
//! for x in 10..54 {
//!     pm.set_pixel(x, 32, 1).unwrap();
//! }
//! let line: Pix = pm.into();
//!
//! let options = ScoreOptions::default().with_canvas_size(64);
//! let result = score_masks(&line, &line, &options).unwrap();
//! assert!(result.is_correct);
//! assert_eq!(result.accuracy_percent(), 100.0);
//! ```

pub mod cache;
mod error;
pub mod normalize;
mod options;
pub mod pipeline;
pub mod scorer;

pub use cache::{Reference, ReferenceCache, ReferenceKey, global_reference_cache};
pub use error::{ScoringError, ScoringResult};
pub use normalize::{normalize_drawing, normalize_mask};
pub use options::{DEFAULT_CANVAS_SIZE, ScoreOptions};
pub use pipeline::{
    ScoreOutcome, ScoreReport, Scorer, build_reference, decode_drawing, score, score_data_url,
    score_with_options,
};
pub use scorer::{ScoreResult, accuracy_percent, score_masks};
