//! tracemark-transform - Geometric transformations
//!
//! Uniform rescaling of cropped strokes:
//!
//! - Area mapping for downscaling (anti-aliased)
//! - Bilinear interpolation for upscaling
//! - Nearest-neighbor sampling

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale, scale_by_sampling, scale_to_size};
