//! tracemark-morph - Binary morphology
//!
//! This crate provides the morphological operations used to reduce
//! strokes to their centerlines:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Word-parallel hit-miss transform on 1-bpp images
//! - Connectivity-preserving thinning (skeletonization)

pub mod binary;
mod error;
pub mod sel;
pub mod thin;
pub mod thin_sels;

pub use binary::hit_miss_transform;
pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};
pub use thin::{Connectivity, thin_connected, thin_connected_by_set};
pub use thin_sels::{ThinSelSet, make_thin_sels};
