//! Distance field and component regression test
//!
//! Checks the exact transform against brute force on a stroke drawing,
//! bounds the chamfer error, and verifies that thinning keeps the number
//! of strokes.
//!
//! Run with:
//! ```
//! cargo test -p tracemark-region --test distance_reg
//! ```

use tracemark_morph::{Connectivity, thin_connected};
use tracemark_region::{ConnectivityType, DistanceMetric, connected_components, distance_field};
use tracemark_test::RegParams;
use tracemark_test::synth::Drawing;

#[test]
fn distance_reg() {
    let mut rp = RegParams::new("distance");

    let drawing = Drawing::new(64, 48)
        .with_line_width(3)
        .stroke(&[(8, 8), (40, 12)])
        .stroke(&[(50, 40), (56, 20)]);
    let mask = drawing.to_mask().expect("rasterize drawing");
    let points = mask.foreground_points();

    let exact = distance_field(&mask, DistanceMetric::Euclidean).expect("euclidean field");
    let approx = distance_field(&mask, DistanceMetric::Chamfer).expect("chamfer field");

    let mut worst_exact = 0f64;
    let mut worst_ratio = 0f64;
    for y in (0..48).step_by(3) {
        for x in (0..64).step_by(3) {
            let brute = points
                .iter()
                .map(|&(px, py)| {
                    let dx = f64::from(px) - f64::from(x);
                    let dy = f64::from(py) - f64::from(y);
                    (dx * dx + dy * dy).sqrt()
                })
                .fold(f64::INFINITY, f64::min);
            let e = f64::from(exact.get_pixel(x, y).expect("in bounds"));
            let a = f64::from(approx.get_pixel(x, y).expect("in bounds"));
            worst_exact = worst_exact.max((e - brute).abs());
            if brute > 0.0 {
                worst_ratio = worst_ratio.max((a - brute).abs() / brute);
            }
        }
    }
    eprintln!("  worst euclidean error: {worst_exact:.2e}");
    eprintln!("  worst chamfer relative error: {worst_ratio:.3}");
    rp.compare_values(0.0, worst_exact, 1e-3);
    rp.check(worst_ratio <= 0.08, "chamfer within 8% of euclidean");

    // every foreground pixel is at distance zero
    let (sum, count) = exact.masked_sum(&mask).expect("masked sum");
    rp.compare_values(0.0, sum, 0.0);
    rp.compare_values(points.len() as f64, count as f64, 0.0);

    // thinning keeps each stroke in one piece
    let strokes = connected_components(&mask, ConnectivityType::EightWay).expect("components");
    let skel = thin_connected(&mask, Connectivity::Eight, 0).expect("thin");
    let skel_strokes =
        connected_components(&skel, ConnectivityType::EightWay).expect("skeleton components");
    rp.compare_values(2.0, strokes.len() as f64, 0.0);
    rp.compare_values(strokes.len() as f64, skel_strokes.len() as f64, 0.0);

    let field_image = exact.to_pix_scaled(4.0).expect("render field");
    rp.write_pix_and_check(&field_image).expect("write field");

    assert!(rp.cleanup(), "distance regression test failed");
}
