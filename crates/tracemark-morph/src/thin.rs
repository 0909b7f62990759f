//! Connectivity-preserving thinning operations
//!
//! Thinning reduces binary images to 1-pixel wide skeletons while preserving
//! connectivity, following Bloomberg, "Connectivity-preserving morphological
//! image transformations" (SPIE 1606, 1991).
//!
//! # Algorithm
//!
//! 1. For each iteration, apply the SEL set in 4 orthogonal rotations
//! 2. For each rotation, compute the union of HMT results from all SELs
//! 3. Subtract the accumulated result from the image
//! 4. Repeat until no changes occur or max iterations reached

use crate::binary::{check_binary, hit_miss_transform};
use crate::thin_sels::{ThinSelSet, make_thin_sels};
use crate::{MorphError, MorphResult, Sel};
use tracemark_core::Pix;

/// Connectivity type for thinning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4-connected (preserves 4-connectivity)
    Four,

    /// 8-connected (preserves 8-connectivity)
    #[default]
    Eight,
}

/// Thin a binary image while preserving connectivity
///
/// # Arguments
///
/// * `pix` - 1-bpp binary image
/// * `connectivity` - 4 or 8 connectivity to preserve
/// * `max_iters` - Maximum number of iterations (0 = until convergence)
pub fn thin_connected(
    pix: &Pix,
    connectivity: Connectivity,
    max_iters: u32,
) -> MorphResult<Pix> {
    let set = match connectivity {
        Connectivity::Four => ThinSelSet::Set4cc1,
        Connectivity::Eight => ThinSelSet::Set8cc1,
    };
    thin_connected_by_set(pix, &make_thin_sels(set)?, max_iters)
}

/// Thin a binary image using a specific SEL set
///
/// Each SEL is used in all four orthogonal rotations.
pub fn thin_connected_by_set(
    pix: &Pix,
    sels: &[Sel],
    max_iters: u32,
) -> MorphResult<Pix> {
    check_binary(pix)?;
    if sels.is_empty() {
        return Err(MorphError::InvalidParameters(
            "thinning needs at least one SEL".to_string(),
        ));
    }

    let rotations: Vec<Vec<Sel>> = (0..4)
        .map(|quads| sels.iter().map(|sel| sel.rotate_orth(quads)).collect())
        .collect();

    let mut current = pix.clone();
    let max_iters = if max_iters == 0 { u32::MAX } else { max_iters };

    for _ in 0..max_iters {
        let before = current.clone();
        for rotated in &rotations {
            let mut removable = current.create_template().into_mut();
            for sel in rotated {
                removable.or_inplace(&hit_miss_transform(&current, sel)?)?;
            }
            current = current.subtract(&removable.into())?;
        }
        if current.data() == before.data() {
            break;
        }
    }

    Ok(current)
}
