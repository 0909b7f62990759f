//! Connected component analysis
//!
//! Two-pass labeling with a union-find (disjoint set) structure: the first
//! raster pass assigns provisional labels and records equivalences, the
//! second resolves each pixel to its root.

use crate::{RegionError, RegionResult};
use tracemark_core::{Box, Pix, PixelDepth};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label, starting at 1 in raster order of each component's first pixel
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        Self { parent: Vec::new() }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (lo, hi) = (ra.min(rb), ra.max(rb));
            self.parent[hi as usize] = lo;
        }
    }
}

/// Find all connected components in a binary image
///
/// Returns one entry per component with its pixel count and bounding box.
pub fn connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    const NONE: u32 = u32::MAX;
    let mut labels = vec![NONE; w * h];
    let mut sets = UnionFind::new();

    for y in 0..h {
        let mut row_fg = Vec::new();
        pix.for_each_fg_in_row(y as u32, |x| row_fg.push(x as usize));
        for x in row_fg {
            let mut neighbors = [NONE; 4];
            if x > 0 {
                neighbors[0] = labels[y * w + x - 1];
            }
            if y > 0 {
                let up = (y - 1) * w;
                neighbors[1] = labels[up + x];
                if connectivity == ConnectivityType::EightWay {
                    if x > 0 {
                        neighbors[2] = labels[up + x - 1];
                    }
                    if x + 1 < w {
                        neighbors[3] = labels[up + x + 1];
                    }
                }
            }

            let mut label = NONE;
            for &n in neighbors.iter().filter(|&&n| n != NONE) {
                if label == NONE {
                    label = n;
                } else {
                    sets.union(label, n);
                }
            }
            if label == NONE {
                label = sets.make_set();
            }
            labels[y * w + x] = label;
        }
    }

    // Resolve roots; components are numbered in order of first appearance
    let mut index_of_root = vec![NONE; sets.parent.len()];
    let mut stats: Vec<(u32, i32, i32, i32, i32)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let label = labels[y * w + x];
            if label == NONE {
                continue;
            }
            let root = sets.find(label) as usize;
            if index_of_root[root] == NONE {
                index_of_root[root] = stats.len() as u32;
                stats.push((0, x as i32, y as i32, x as i32, y as i32));
            }
            let s = &mut stats[index_of_root[root] as usize];
            s.0 += 1;
            s.1 = s.1.min(x as i32);
            s.2 = s.2.min(y as i32);
            s.3 = s.3.max(x as i32);
            s.4 = s.4.max(y as i32);
        }
    }

    Ok(stats
        .into_iter()
        .enumerate()
        .map(|(i, (count, x0, y0, x1, y1))| ConnectedComponent {
            label: i as u32 + 1,
            pixel_count: count,
            bounds: Box::new_unchecked(x0, y0, x1 - x0 + 1, y1 - y0 + 1),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracemark_test::synth::mask_from_points;

    #[test]
    fn test_diagonal_pair() {
        let pix = mask_from_points(10, 10, &[(2, 2), (3, 3), (8, 1)]).unwrap();
        let four = connected_components(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(four.len(), 3);
        let eight = connected_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(eight.len(), 2);
        assert_eq!(eight[0].label, 1);
        assert_eq!(eight[0].pixel_count, 1);
        assert_eq!(eight[0].bounds, Box::new_unchecked(8, 1, 1, 1));
        assert_eq!(eight[1].pixel_count, 2);
        assert_eq!(eight[1].bounds, Box::new_unchecked(2, 2, 2, 2));
    }

    #[test]
    fn test_u_shape_merges() {
        // two arms joined only at the bottom row
        let mut points = Vec::new();
        for y in 0..5 {
            points.push((1, y));
            points.push((5, y));
        }
        for x in 1..=5 {
            points.push((x, 5));
        }
        let pix = mask_from_points(8, 8, &points).unwrap();
        let comps = connected_components(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 15);
        assert_eq!(comps[0].bounds, Box::new_unchecked(1, 0, 5, 6));
    }

    #[test]
    fn test_empty_and_wrong_depth() {
        let empty = Pix::new(5, 5, PixelDepth::Bit1).unwrap();
        assert!(connected_components(&empty, ConnectivityType::EightWay).unwrap().is_empty());
        let gray = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
        assert!(connected_components(&gray, ConnectivityType::EightWay).is_err());
    }
}
