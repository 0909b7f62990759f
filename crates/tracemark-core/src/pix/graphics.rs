//! Stroke rendering
//!
//! Drawings arrive from a canvas as round-capped polylines, so this is the
//! one primitive needed to build synthetic drawings.

use super::PixMut;
use crate::error::Result;

/// Pixel operation for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelOp {
    /// Set pixels to maximum value (ink)
    #[default]
    Set,
    /// Clear pixels to zero (erase)
    Clear,
}

/// Points of a Bresenham line from (x1, y1) to (x2, y2), both ends included.
fn line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x2 > x1 { 1 } else { -1 };
    let sy = if y2 > y1 { 1 } else { -1 };
    let steps = dx.max(dy);

    let mut points = Vec::with_capacity(steps as usize + 1);
    let (mut x, mut y) = (x1, y1);
    // error term of the minor axis
    let mut err = steps / 2;
    for _ in 0..=steps {
        points.push((x, y));
        if dx >= dy {
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        } else {
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }
    points
}

/// Offsets of a filled disk of the given radius centered at the origin.
///
/// A point is inside when `dx² + dy² <= r² + r/2`, which gives a rounder
/// outline than the strict test at small radii.
fn disk_offsets(radius: u32) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let limit = r * r + r / 2;
    (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx * dx + dy * dy <= limit)
        .collect()
}

impl PixMut {
    #[inline]
    fn apply_op(&mut self, x: i32, y: i32, op: PixelOp) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let val = match op {
            PixelOp::Set => self.depth().max_value(),
            PixelOp::Clear => 0,
        };
        self.set_pixel_unchecked(x as u32, y as u32, val);
    }

    /// Render a round-capped stroke of the given width along a polyline.
    ///
    /// Every point of each segment is stamped with a disk of diameter
    /// `width`, giving round joins and caps. A single vertex draws a dot.
    /// Parts falling outside the image are dropped.
    pub fn render_stroke(
        &mut self,
        vertices: &[(i32, i32)],
        width: u32,
        op: PixelOp,
    ) -> Result<()> {
        let disk = disk_offsets(width.max(1) / 2);
        let stamp = |pm: &mut PixMut, x: i32, y: i32| {
            for &(dx, dy) in &disk {
                pm.apply_op(x + dx, y + dy, op);
            }
        };

        match vertices {
            [] => {}
            [(x, y)] => stamp(self, *x, *y),
            _ => {
                for pair in vertices.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    for (x, y) in line_points(x1, y1, x2, y2) {
                        stamp(self, x, y);
                    }
                }
            }
        }
        Ok(())
    }
}
