//! tracemark-region - Region processing
//!
//! This crate provides:
//!
//! - **Distance fields** - Distance from every pixel to the nearest
//!   foreground pixel of a mask, exact Euclidean or 3-4 chamfer
//! - **Connected component analysis** - Union-find labeling of binary images
//!
//! # Examples
//!
//! ```
//! use tracemark_core::{Pix, PixelDepth};
//! use tracemark_region::{DistanceMetric, distance_field};
//!
//! let mut pm = Pix::new(10, 10, PixelDepth::Bit1).unwrap().to_mut();
//! pm.set_pixel(2, 2, 1).unwrap();
//! let pix: Pix = pm.into();
//!
//! let field = distance_field(&pix, DistanceMetric::Euclidean).unwrap();
//! assert_eq!(field.get_pixel(2, 2).unwrap(), 0.0);
//! assert_eq!(field.get_pixel(5, 6).unwrap(), 5.0);
//! ```

pub mod conncomp;
pub mod distance;
mod error;

pub use conncomp::{ConnectedComponent, ConnectivityType, connected_components};
pub use distance::{DistanceMetric, distance_field};
pub use error::{RegionError, RegionResult};
