//! Skeleton distance scoring
//!
//! A drawing is compared with the skeleton of the reference in both
//! directions:
//!
//! - **precision**: how close the user's ink lies to the skeleton (mean of
//!   the skeleton distance field over user pixels)
//! - **completeness**: how much of the skeleton the ink covers (mean of the
//!   user distance field over skeleton pixels)
//!
//! Each mean distance `d` becomes a sub-score `1 - min(d / max_dist, 1)`
//! and the final score is their geometric mean, so scribbling everywhere
//! and drawing one precise dot both score poorly.

use crate::{ScoreOptions, ScoringError, ScoringResult};
use tracemark_core::{FPix, Pix};
use tracemark_region::distance_field;
use tracing::debug;

/// Scores for one drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    /// Sub-score for ink lying near the skeleton, in `[0, 1]`
    pub precision: f64,
    /// Sub-score for the skeleton being covered by ink, in `[0, 1]`
    pub completeness: f64,
    /// `sqrt(precision * completeness)`
    pub final_score: f64,
    /// `final_score >= pass_threshold`
    pub is_correct: bool,
}

impl ScoreResult {
    /// Combine two sub-scores
    pub fn from_parts(precision: f64, completeness: f64, pass_threshold: f64) -> Self {
        let final_score = (precision * completeness).sqrt();
        Self {
            precision,
            completeness,
            final_score,
            is_correct: final_score >= pass_threshold,
        }
    }

    /// The result for inputs with nothing to compare
    pub fn zero() -> Self {
        Self {
            precision: 0.0,
            completeness: 0.0,
            final_score: 0.0,
            is_correct: false,
        }
    }

    /// The final score as a percentage with one decimal
    pub fn accuracy_percent(&self) -> f64 {
        accuracy_percent(self.final_score)
    }
}

/// Convert a score in `[0, 1]` to a percentage rounded to one decimal
pub fn accuracy_percent(score: f64) -> f64 {
    (score.clamp(0.0, 1.0) * 1000.0).round() / 10.0
}

fn sub_score(field: &FPix, mask: &Pix, max_dist: f64) -> ScoringResult<f64> {
    let (sum, count) = field.masked_sum(mask)?;
    if count == 0 {
        return Ok(0.0);
    }
    let mean = sum / count as f64;
    Ok(1.0 - (mean / max_dist).min(1.0))
}

/// Score a normalized user mask against a reference skeleton
///
/// Both masks must be 1 bpp and the same size. If either has no
/// foreground the result is [`ScoreResult::zero`].
///
/// # Errors
///
/// Returns [`ScoringError::SizeMismatch`] if the masks differ in size.
pub fn score_masks(
    user: &Pix,
    skeleton: &Pix,
    options: &ScoreOptions,
) -> ScoringResult<ScoreResult> {
    options.validate()?;
    if !user.sizes_equal(skeleton) {
        return Err(ScoringError::SizeMismatch {
            expected: (skeleton.width(), skeleton.height()),
            actual: (user.width(), user.height()),
        });
    }
    let user_pixels = user.count_pixels();
    let skeleton_pixels = skeleton.count_pixels();
    if user_pixels == 0 || skeleton_pixels == 0 {
        debug!(
            "Nothing to compare: {} user pixels, {} skeleton pixels",
            user_pixels, skeleton_pixels
        );
        return Ok(ScoreResult::zero());
    }

    let max_dist = options.max_dist();
    let skeleton_field = distance_field(skeleton, options.metric)?;
    let user_field = distance_field(user, options.metric)?;
    let precision = sub_score(&skeleton_field, user, max_dist)?;
    let completeness = sub_score(&user_field, skeleton, max_dist)?;

    let result = ScoreResult::from_parts(precision, completeness, options.pass_threshold);
    debug!(
        "precision {:.4}, completeness {:.4}, final {:.4}",
        result.precision, result.completeness, result.final_score
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracemark_core::PixelDepth;
    use tracemark_test::synth::mask_from_points;

    fn options() -> ScoreOptions {
        ScoreOptions::default().with_canvas_size(100)
    }

    fn hline(y: u32, x0: u32, x1: u32) -> Pix {
        let points: Vec<_> = (x0..=x1).map(|x| (x, y)).collect();
        mask_from_points(100, 100, &points).unwrap()
    }

    #[test]
    fn test_identical_masks_score_one() {
        let line = hline(50, 10, 90);
        let result = score_masks(&line, &line, &options()).unwrap();
        assert_eq!(result.final_score, 1.0);
        assert!(result.is_correct);
        assert_eq!(result.accuracy_percent(), 100.0);
    }

    #[test]
    fn test_parallel_offset() {
        // max_dist is 10 px; a line 4 px away keeps 60% on both sides
        let result = score_masks(&hline(54, 10, 90), &hline(50, 10, 90), &options()).unwrap();
        assert!((result.precision - 0.6).abs() < 1e-9);
        assert!((result.completeness - 0.6).abs() < 1e-9);
        assert!((result.final_score - 0.6).abs() < 1e-9);
        assert!(result.is_correct);
    }

    #[test]
    fn test_far_away_scores_zero() {
        let result = score_masks(&hline(95, 10, 90), &hline(5, 10, 90), &options()).unwrap();
        assert_eq!(result.final_score, 0.0);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_empty_masks_score_zero() {
        let empty = Pix::new(100, 100, PixelDepth::Bit1).unwrap();
        let line = hline(50, 10, 90);
        assert_eq!(score_masks(&empty, &line, &options()).unwrap(), ScoreResult::zero());
        assert_eq!(score_masks(&line, &empty, &options()).unwrap(), ScoreResult::zero());
    }

    #[test]
    fn test_size_mismatch() {
        let small = Pix::new(50, 50, PixelDepth::Bit1).unwrap();
        let err = score_masks(&small, &hline(50, 10, 90), &options()).unwrap_err();
        assert!(matches!(err, ScoringError::SizeMismatch { .. }));
    }

    #[test]
    fn test_accuracy_percent_rounding() {
        assert_eq!(accuracy_percent(0.12345), 12.3);
        assert_eq!(accuracy_percent(0.98765), 98.8);
        assert_eq!(accuracy_percent(0.0), 0.0);
        assert_eq!(accuracy_percent(1.0), 100.0);
    }

    #[test]
    fn test_pass_threshold() {
        assert!(ScoreResult::from_parts(0.5, 0.5, 0.5).is_correct);
        assert!(!ScoreResult::from_parts(0.49, 0.5, 0.5).is_correct);
    }
}
