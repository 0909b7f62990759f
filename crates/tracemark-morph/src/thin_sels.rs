//! Structuring elements for connectivity-preserving thinning
//!
//! Each set is applied in all four orthogonal rotations. The patterns
//! follow Bloomberg, "Connectivity-preserving morphological image
//! transformations" (SPIE 1606, 1991).

use crate::{MorphResult, Sel};

// 4-connected
const SEL_4_1: &str = "  x\noCx\n  x";
const SEL_4_2: &str = "  x\noCx\n o ";
const SEL_4_3: &str = " o \noCx\n  x";

// 8-connected
const SEL_8_2: &str = " x \noCx\no  ";
const SEL_8_3: &str = "o  \noCx\n x ";
const SEL_8_5: &str = "o x\noCx\no  ";
const SEL_8_6: &str = "o  \noCx\no x";

/// Thinning SEL sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinSelSet {
    /// sel_4_1, sel_4_2, sel_4_3: preserves 4-connectivity
    Set4cc1,
    /// sel_8_2, sel_8_3, sel_8_5, sel_8_6: preserves 8-connectivity
    Set8cc1,
}

impl ThinSelSet {
    fn patterns(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ThinSelSet::Set4cc1 => &[
                ("sel_4_1", SEL_4_1),
                ("sel_4_2", SEL_4_2),
                ("sel_4_3", SEL_4_3),
            ],
            ThinSelSet::Set8cc1 => &[
                ("sel_8_2", SEL_8_2),
                ("sel_8_3", SEL_8_3),
                ("sel_8_5", SEL_8_5),
                ("sel_8_6", SEL_8_6),
            ],
        }
    }
}

/// Build the SELs of a thinning set
pub fn make_thin_sels(set: ThinSelSet) -> MorphResult<Vec<Sel>> {
    set.patterns()
        .iter()
        .map(|&(name, pattern)| {
            let mut sel = Sel::from_string(pattern)?;
            sel.set_name(name);
            Ok(sel)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_4cc() {
        let sels = make_thin_sels(ThinSelSet::Set4cc1).unwrap();
        let names: Vec<_> = sels.iter().filter_map(Sel::name).collect();
        assert_eq!(names, ["sel_4_1", "sel_4_2", "sel_4_3"]);
        for sel in &sels {
            assert_eq!((sel.width(), sel.height()), (3, 3));
            assert_eq!((sel.origin_x(), sel.origin_y()), (1, 1));
        }
    }

    #[test]
    fn test_set_8cc() {
        let sels = make_thin_sels(ThinSelSet::Set8cc1).unwrap();
        assert_eq!(sels.len(), 4);
        assert_eq!(sels[0].name(), Some("sel_8_2"));
        assert_eq!(sels[0].hit_count(), 3);
        assert_eq!(sels[0].miss_count(), 2);
    }
}
