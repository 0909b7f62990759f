//! Scoring options

use crate::{ScoringError, ScoringResult};
use tracemark_morph::Connectivity;
use tracemark_region::DistanceMetric;
use tracemark_render::RenderOptions;

/// Default side of the square comparison canvas
pub const DEFAULT_CANVAS_SIZE: u32 = 256;

/// Options for normalizing and scoring drawings
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOptions {
    /// Side of the square canvas both masks are normalized to
    pub canvas_size: u32,
    /// Share of the canvas the longer side of a normalized stroke covers
    pub fill_fraction: f64,
    /// Alpha values above this are ink
    pub alpha_threshold: u8,
    /// Distance, as a fraction of the canvas size, at which a pixel
    /// earns no credit
    pub max_dist_fraction: f64,
    /// Final score needed for a drawing to count as correct
    pub pass_threshold: f64,
    /// Distance metric for both distance fields
    pub metric: DistanceMetric,
    /// Connectivity kept by skeleton thinning
    pub connectivity: Connectivity,
    /// Reference text fitting
    pub render: RenderOptions,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            fill_fraction: 0.9,
            alpha_threshold: 10,
            max_dist_fraction: 0.10,
            pass_threshold: 0.5,
            metric: DistanceMetric::Euclidean,
            connectivity: Connectivity::Eight,
            render: RenderOptions::default(),
        }
    }
}

impl ScoreOptions {
    /// Set the canvas size
    pub fn with_canvas_size(mut self, size: u32) -> Self {
        self.canvas_size = size;
        self
    }

    /// Set the fill fraction of normalized strokes
    pub fn with_fill_fraction(mut self, fraction: f64) -> Self {
        self.fill_fraction = fraction;
        self
    }

    /// Set the alpha threshold
    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    /// Set the no-credit distance as a fraction of the canvas size
    pub fn with_max_dist_fraction(mut self, fraction: f64) -> Self {
        self.max_dist_fraction = fraction;
        self
    }

    /// Set the pass threshold
    pub fn with_pass_threshold(mut self, threshold: f64) -> Self {
        self.pass_threshold = threshold;
        self
    }

    /// Set the distance metric
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the skeleton connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the reference fitting options
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Distance in pixels at which a pixel earns no credit
    pub fn max_dist(&self) -> f64 {
        self.max_dist_fraction * f64::from(self.canvas_size)
    }

    /// Longer side of a normalized stroke, in pixels
    pub fn target_extent(&self) -> u32 {
        ((self.fill_fraction * f64::from(self.canvas_size)).round() as u32).max(1)
    }

    /// True if references built with these options match those built with
    /// the defaults at the same canvas size
    pub(crate) fn has_default_reference(&self) -> bool {
        let defaults = ScoreOptions::default();
        self.fill_fraction == defaults.fill_fraction
            && self.connectivity == defaults.connectivity
            && self.render == defaults.render
    }

    /// Check that the options are usable
    pub fn validate(&self) -> ScoringResult<()> {
        if self.canvas_size == 0 {
            return Err(ScoringError::InvalidParameters(
                "canvas_size must be positive".to_string(),
            ));
        }
        if !(self.fill_fraction > 0.0 && self.fill_fraction <= 1.0) {
            return Err(ScoringError::InvalidParameters(format!(
                "fill_fraction must be in (0, 1], got {}",
                self.fill_fraction
            )));
        }
        if !(self.max_dist_fraction.is_finite() && self.max_dist_fraction > 0.0) {
            return Err(ScoringError::InvalidParameters(format!(
                "max_dist_fraction must be positive, got {}",
                self.max_dist_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.pass_threshold) {
            return Err(ScoringError::InvalidParameters(format!(
                "pass_threshold must be in [0, 1], got {}",
                self.pass_threshold
            )));
        }
        self.render
            .validate()
            .map_err(|e| ScoringError::InvalidParameters(e.to_string()))
    }
}
