//! Scoring entry points
//!
//! [`score`] takes the encoded drawing straight from the upload and never
//! fails: decoding problems, blank canvases and internal errors are all
//! folded into a [`ScoreOutcome`]. [`Scorer`] exposes the same pipeline
//! with typed errors and per-stage diagnostics.

use crate::cache::{Reference, ReferenceCache, ReferenceKey, global_reference_cache};
use crate::normalize::{normalize_drawing, normalize_mask};
use crate::scorer::{ScoreResult, score_masks};
use crate::{ScoreOptions, ScoringError, ScoringResult};
use std::path::Path;
use std::sync::Arc;
use tracemark_core::{Box, Pix};
use tracemark_io::{decode_data_url, read_image_bytes};
use tracemark_morph::{Connectivity, thin_connected};
use tracemark_region::{ConnectivityType, connected_components};
use tracemark_render::{FontRasterizer, FontSource, render_text, resolve_font};
use tracing::{debug, warn};

/// Result of scoring one drawing, as reported to callers
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// False if the drawing could not be scored at all
    pub success: bool,
    /// Why scoring failed, or why the score is zero
    pub error_message: Option<String>,
    /// Whether the drawing passes
    pub is_correct: bool,
    /// Final score as a percentage with one decimal
    pub accuracy_percent: f64,
}

impl ScoreOutcome {
    /// Outcome of a completed comparison
    pub fn scored(result: &ScoreResult) -> Self {
        Self {
            success: true,
            error_message: None,
            is_correct: result.is_correct,
            accuracy_percent: result.accuracy_percent(),
        }
    }

    /// Outcome of a failed or degenerate comparison
    ///
    /// Inputs that cannot be scored still succeed with a zero score.
    pub fn from_error(err: &ScoringError) -> Self {
        match err {
            ScoringError::UnsupportedInputFormat(_) => warn!("Scoring as zero: {}", err),
            ScoringError::EmptyInput(_) => debug!("Scoring as zero: {}", err),
            _ => warn!("Scoring failed: {}", err),
        }
        Self {
            success: err.is_scoring_degeneracy(),
            error_message: Some(err.to_string()),
            is_correct: false,
            accuracy_percent: 0.0,
        }
    }

    /// The `(success, error message)` pair, with an empty message when
    /// there is nothing to report
    pub fn as_tuple(&self) -> (bool, String) {
        (self.success, self.error_message.clone().unwrap_or_default())
    }
}

impl From<ScoringResult<ScoreReport>> for ScoreOutcome {
    fn from(result: ScoringResult<ScoreReport>) -> Self {
        match result {
            Ok(report) => ScoreOutcome::scored(&report.result),
            Err(e) => ScoreOutcome::from_error(&e),
        }
    }
}

/// Detailed result of scoring one drawing
#[derive(Debug, Clone)]
pub struct ScoreReport {
    /// Sub-scores and verdict
    pub result: ScoreResult,
    /// Foreground pixels of the normalized drawing
    pub user_pixels: u64,
    /// Foreground pixels of the reference skeleton
    pub skeleton_pixels: u64,
    /// Connected strokes in the reference skeleton
    pub reference_strokes: usize,
    /// Pixel size the reference text was drawn at
    pub px_size: u32,
    /// Bounding box of the normalized drawing
    pub user_box: Box,
    /// Font the reference was drawn with
    pub font: FontSource,
}

impl ScoreReport {
    /// Final score as a percentage with one decimal
    pub fn accuracy_percent(&self) -> f64 {
        self.result.accuracy_percent()
    }
}

fn component_connectivity(connectivity: Connectivity) -> ConnectivityType {
    match connectivity {
        Connectivity::Four => ConnectivityType::FourWay,
        Connectivity::Eight => ConnectivityType::EightWay,
    }
}

/// Render, normalize and thin the reference for `text`
///
/// # Errors
///
/// Returns [`ScoringError::EmptyInput`] if the text draws no ink, and
/// [`ScoringError::Render`] if no font is available or no font has glyphs
/// for the text.
pub fn build_reference(
    text: &str,
    font_path: impl AsRef<Path>,
    options: &ScoreOptions,
) -> ScoringResult<Reference> {
    options.validate()?;
    if text.trim().is_empty() {
        return Err(ScoringError::EmptyInput("expected text is empty".to_string()));
    }

    let rasterizer = FontRasterizer::new(resolve_font(font_path, text)?)?;
    let rendered = render_text(&rasterizer, text, options.canvas_size, &options.render)?;
    let mask = normalize_mask(&rendered.mask, options)?
        .ok_or_else(|| ScoringError::EmptyInput(format!("text {:?} renders no ink", text)))?;
    let skeleton = thin_connected(&mask, options.connectivity, 0)?;
    let strokes =
        connected_components(&skeleton, component_connectivity(options.connectivity))?.len();
    debug!(
        "Built reference for {:?}: {} px, {} skeleton pixels in {} strokes",
        text,
        rendered.px_size,
        skeleton.count_pixels(),
        strokes
    );

    Ok(Reference {
        mask,
        skeleton,
        px_size: rendered.px_size,
        strokes,
        font: rasterizer.font().source().clone(),
    })
}

/// Decode an uploaded drawing
///
/// # Errors
///
/// Returns [`ScoringError::MalformedEncodedImage`] for anything that does
/// not decode as PNG: empty payloads, foreign formats, garbage and
/// truncated data.
pub fn decode_drawing(bytes: &[u8]) -> ScoringResult<Pix> {
    if bytes.is_empty() {
        return Err(ScoringError::MalformedEncodedImage(
            "no image data".to_string(),
        ));
    }
    Ok(read_image_bytes(bytes)?)
}

/// Scoring engine with fixed options and a reference cache
#[derive(Debug, Clone)]
pub struct Scorer {
    options: ScoreOptions,
    cache: Arc<ReferenceCache>,
}

impl Scorer {
    /// Create a scorer with its own reference cache
    pub fn new(options: ScoreOptions) -> ScoringResult<Self> {
        Self::with_cache(options, Arc::new(ReferenceCache::new()))
    }

    /// Create a scorer sharing `cache`
    ///
    /// The cache key does not include the options, so scorers sharing a
    /// cache should build references the same way.
    pub fn with_cache(options: ScoreOptions, cache: Arc<ReferenceCache>) -> ScoringResult<Self> {
        options.validate()?;
        Ok(Self { options, cache })
    }

    /// The scoring options
    pub fn options(&self) -> &ScoreOptions {
        &self.options
    }

    /// The reference cache
    pub fn cache(&self) -> &Arc<ReferenceCache> {
        &self.cache
    }

    /// The reference for `text`, from the cache or freshly built
    pub fn reference(
        &self,
        text: &str,
        font_path: impl AsRef<Path>,
    ) -> ScoringResult<Arc<Reference>> {
        let font_path = font_path.as_ref();
        let key = ReferenceKey::new(text, font_path, self.options.canvas_size);
        self.cache
            .get_or_build(key, || build_reference(text, font_path, &self.options))
    }

    /// Score a decoded RGBA drawing, with diagnostics
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::EmptyInput`] for a blank drawing and
    /// [`ScoringError::UnsupportedInputFormat`] for a drawing without
    /// alpha.
    pub fn evaluate(
        &self,
        drawing: &Pix,
        text: &str,
        font_path: impl AsRef<Path>,
    ) -> ScoringResult<ScoreReport> {
        let Some(user) = normalize_drawing(drawing, &self.options)? else {
            return Err(ScoringError::EmptyInput("blank canvas".to_string()));
        };
        let reference = self.reference(text, font_path)?;
        let result = score_masks(&user, &reference.skeleton, &self.options)?;

        Ok(ScoreReport {
            result,
            user_pixels: user.count_pixels(),
            skeleton_pixels: reference.skeleton.count_pixels(),
            reference_strokes: reference.strokes,
            px_size: reference.px_size,
            user_box: user.foreground_bbox()?.unwrap_or_default(),
            font: reference.font.clone(),
        })
    }

    /// Score an encoded drawing, with diagnostics
    pub fn evaluate_bytes(
        &self,
        bytes: &[u8],
        text: &str,
        font_path: impl AsRef<Path>,
    ) -> ScoringResult<ScoreReport> {
        let drawing = decode_drawing(bytes)?;
        self.evaluate(&drawing, text, font_path)
    }

    /// Score a decoded RGBA drawing
    pub fn score_pix(
        &self,
        drawing: &Pix,
        text: &str,
        font_path: impl AsRef<Path>,
    ) -> ScoreOutcome {
        self.evaluate(drawing, text, font_path).into()
    }

    /// Score an encoded drawing
    pub fn score_bytes(
        &self,
        bytes: &[u8],
        text: &str,
        font_path: impl AsRef<Path>,
    ) -> ScoreOutcome {
        self.evaluate_bytes(bytes, text, font_path).into()
    }

    /// Score a drawing given as a data URL or bare base64 payload
    pub fn score_data_url(
        &self,
        data_url: &str,
        text: &str,
        font_path: impl AsRef<Path>,
    ) -> ScoreOutcome {
        match decode_data_url(data_url) {
            Ok(bytes) => self.score_bytes(&bytes, text, font_path),
            Err(e) => ScoreOutcome::from_error(&ScoringError::from(e)),
        }
    }
}

/// A scorer for `options` backed by the process-wide cache when its
/// references match the default ones
fn shared_scorer(options: &ScoreOptions) -> ScoringResult<Scorer> {
    let cache = if options.has_default_reference() {
        Arc::clone(global_reference_cache())
    } else {
        Arc::new(ReferenceCache::new())
    };
    Scorer::with_cache(options.clone(), cache)
}

/// Score an encoded drawing of `expected_text`
///
/// `user_drawing` is a PNG with an alpha channel; ink is any pixel that is
/// not transparent. Both the drawing and the text rendered with the font at
/// `font_path` are normalized to a `canvas_size` square.
///
/// # Examples
///
/// ```no_run
/// let png = std::fs::read("drawing.png")?;
/// let outcome = tracemark_score::score(&png, "அ", "fonts/tamil.ttf", 256);
/// let (success, message) = outcome.as_tuple();
/// if success {
///     println!("{}% correct={} {}", outcome.accuracy_percent, outcome.is_correct, message);
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn score(
    user_drawing: &[u8],
    expected_text: &str,
    font_path: impl AsRef<Path>,
    canvas_size: u32,
) -> ScoreOutcome {
    let options = ScoreOptions::default().with_canvas_size(canvas_size);
    score_with_options(user_drawing, expected_text, font_path, &options)
}

/// Score an encoded drawing with explicit options
pub fn score_with_options(
    user_drawing: &[u8],
    expected_text: &str,
    font_path: impl AsRef<Path>,
    options: &ScoreOptions,
) -> ScoreOutcome {
    match shared_scorer(options) {
        Ok(scorer) => scorer.score_bytes(user_drawing, expected_text, font_path),
        Err(e) => ScoreOutcome::from_error(&e),
    }
}

/// Score a drawing given as a `data:image/png;base64,...` URL
pub fn score_data_url(
    data_url: &str,
    expected_text: &str,
    font_path: impl AsRef<Path>,
    canvas_size: u32,
) -> ScoreOutcome {
    let options = ScoreOptions::default().with_canvas_size(canvas_size);
    match shared_scorer(&options) {
        Ok(scorer) => scorer.score_data_url(data_url, expected_text, font_path),
        Err(e) => ScoreOutcome::from_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracemark_render::RenderError;
    use tracemark_test::synth::{Drawing, opaque_rgb_png};

    #[test]
    fn test_blank_canvas_scores_zero() {
        let png = Drawing::new(64, 64).to_png().unwrap();
        let outcome = score(&png, "அ", "/nonexistent/font.ttf", 256);
        assert!(outcome.success);
        assert!(!outcome.is_correct);
        assert_eq!(outcome.accuracy_percent, 0.0);
    }

    #[test]
    fn test_no_alpha_scores_zero() {
        let png = opaque_rgb_png(16, 16).unwrap();
        let outcome = score(&png, "அ", "/nonexistent/font.ttf", 256);
        assert!(outcome.success);
        assert_eq!(outcome.accuracy_percent, 0.0);
        assert!(outcome.as_tuple().1.contains("alpha"));
    }

    #[test]
    fn test_malformed_image_fails() {
        let mut png = Drawing::new(16, 16).stroke(&[(8, 8)]).to_png().unwrap();
        png.truncate(png.len() / 2);
        let outcome = score(&png, "அ", "/nonexistent/font.ttf", 256);
        assert!(!outcome.success);
        assert!(outcome.error_message.is_some());
        assert_eq!(outcome.accuracy_percent, 0.0);

        let outcome = score_data_url("data:image/png;base64,!!!", "அ", "font.ttf", 256);
        let (success, message) = outcome.as_tuple();
        assert!(!success);
        assert!(message.contains("malformed"));
    }

    #[test]
    fn test_undecodable_payloads_fail() {
        let png = Drawing::new(16, 16).stroke(&[(8, 8)]).to_png().unwrap();
        let cases: [&[u8]; 4] = [b"", b"definitely not a png", &png[..3], b"GIF89a\x01\x00"];
        for bytes in cases {
            assert!(matches!(
                decode_drawing(bytes),
                Err(ScoringError::MalformedEncodedImage(_))
            ));
            let outcome = score(bytes, "அ", "font.ttf", 256);
            assert!(!outcome.success);
            assert_eq!(outcome.accuracy_percent, 0.0);
            assert!(outcome.as_tuple().1.contains("malformed"));
        }
    }

    #[test]
    fn test_missing_glyphs_fails() {
        let font = tracemark_test::latin_font_path();
        let err = build_reference("\u{10FFFD}", &font, &ScoreOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Render(RenderError::MissingGlyphs { .. })
        ));

        let png = Drawing::new(64, 64).stroke(&[(10, 10), (50, 50)]).to_png().unwrap();
        let outcome = score(&png, "\u{10FFFD}", &font, 256);
        assert!(!outcome.success);
        assert!(!outcome.is_correct);
        assert!(outcome.as_tuple().1.contains("no glyphs"));
    }

    #[test]
    fn test_invalid_canvas_size_fails() {
        let png = Drawing::new(16, 16).stroke(&[(8, 8)]).to_png().unwrap();
        let outcome = score(&png, "அ", "font.ttf", 0);
        assert!(!outcome.success);
    }

    #[test]
    fn test_empty_text_is_degenerate() {
        let err = build_reference("  ", "font.ttf", &ScoreOptions::default()).unwrap_err();
        assert!(matches!(err, ScoringError::EmptyInput(_)));
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome = ScoreOutcome::scored(&ScoreResult::from_parts(0.81, 1.0, 0.5));
        assert_eq!(outcome.as_tuple(), (true, String::new()));
        assert_eq!(outcome.accuracy_percent, 90.0);
        assert!(outcome.is_correct);
    }
}
