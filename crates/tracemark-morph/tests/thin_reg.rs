//! Thinning regression test
//!
//! Thins synthetic pen strokes and checks the skeleton properties the
//! scorer relies on: it stays inside the stroke, is one pixel wide and
//! keeps each stroke in one piece.
//!
//! Run with:
//! ```
//! cargo test -p tracemark-morph --test thin_reg
//! ```

use tracemark_core::{Pix, RopOp};
use tracemark_morph::{Connectivity, thin_connected};
use tracemark_test::RegParams;
use tracemark_test::synth::{Drawing, thicken};

/// True if no 2x2 block of the image is fully set.
fn is_thin(pix: &Pix) -> bool {
    (0..pix.height().saturating_sub(1)).all(|y| {
        (0..pix.width().saturating_sub(1)).all(|x| {
            let block = [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)];
            !block.iter().all(|&(bx, by)| pix.get_pixel_unchecked(bx, by) == 1)
        })
    })
}

#[test]
fn thin_reg() {
    let mut rp = RegParams::new("thin");

    let drawings = [
        Drawing::new(128, 128)
            .with_line_width(11)
            .stroke(&[(20, 20), (100, 100)]),
        Drawing::new(128, 128)
            .with_line_width(9)
            .stroke(&[(20, 100), (64, 20), (108, 100)]),
        Drawing::new(128, 128)
            .with_line_width(7)
            .stroke(&[(30, 30), (100, 30), (100, 100), (30, 100), (30, 30)]),
    ];

    for drawing in &drawings {
        let mask = drawing.to_mask().expect("rasterize drawing");
        let skel = thin_connected(&mask, Connectivity::Eight, 0)
            .expect("thin stroke");
        eprintln!(
            "  stroke pixels: {}, skeleton pixels: {}",
            mask.count_pixels(),
            skel.count_pixels()
        );

        rp.check(skel.count_pixels() > 0, "skeleton is not empty");
        rp.check(
            skel.subtract(&mask).expect("subtract").count_pixels() == 0,
            "skeleton lies inside the stroke",
        );
        rp.check(is_thin(&skel), "skeleton has no 2x2 blocks");
        rp.check(
            skel.count_pixels() * 3 < mask.count_pixels(),
            "skeleton is much smaller than the stroke",
        );

        // dilating the skeleton by the stroke radius recovers most of it
        let grown = thicken(&skel, 11).expect("thicken skeleton");
        let covered = mask.rop(&grown, RopOp::SrcAndDst).expect("and").count_pixels();
        rp.check(
            covered as f64 >= 0.9 * mask.count_pixels() as f64,
            "skeleton reaches every part of the stroke",
        );

        rp.write_pix_and_check(&skel).expect("write skeleton");
    }

    // thinning to convergence is idempotent
    let mask = drawings[1].to_mask().expect("rasterize drawing");
    let once = thin_connected(&mask, Connectivity::Eight, 0)
        .expect("thin once");
    let twice = thin_connected(&once, Connectivity::Eight, 0)
        .expect("thin twice");
    rp.compare_pix(&once, &twice);

    // 4-connected thinning also yields a thin skeleton
    let four = thin_connected(&mask, Connectivity::Four, 0)
        .expect("thin 4-connected");
    rp.check(is_thin(&four), "4-connected skeleton has no 2x2 blocks");

    assert!(rp.cleanup(), "thin regression test failed");
}
