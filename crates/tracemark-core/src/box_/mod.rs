//! Box - Rectangle regions
//!
//! Bounding boxes of foreground content, crop rectangles and paste
//! destinations all use this type.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; coordinates may be negative when a box is
/// positioned partly outside an image (e.g. a paste destination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Length of the longer side
    #[inline]
    pub fn max_side(&self) -> i32 {
        self.w.max(self.h)
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Box of size `w x h` centered inside a `width x height` frame.
    ///
    /// Odd leftovers go to the right and bottom margins.
    pub fn centered_in(w: i32, h: i32, width: i32, height: i32) -> Box {
        Box {
            x: (width - w) / 2,
            y: (height - h) / 2,
            w,
            h,
        }
    }
}
