//! Font-rendered reference regression test
//!
//! Scores against text rendered with a real font:
//!
//! - a single letter with its own skeleton, thickened to a stroke, as the
//!   drawing passes with at least 90%
//! - a word with a single dot as the drawing fails near zero
//! - the full `score` entry point on an encoded drawing
//! - text the font cannot draw fails instead of scoring against boxes
//!
//! `latin_reg` uses the bundled Latin font and always runs. `tamil_reg`
//! scores "அ" and "தண்ணீர்" with the font named by `TRACEMARK_TAMIL_FONT`.
//!
//! Run with:
//! ```
//! cargo test -p tracemark-score --test tamil_reg
//! TRACEMARK_TAMIL_FONT=/path/to/tamil.ttf cargo test -p tracemark-score --test tamil_reg -- --ignored
//! ```

use std::path::Path;
use tracemark_score::{ScoreOptions, Scorer, score, score_data_url, score_masks};
use tracemark_test::synth::{mask_from_points, rgba_from_mask, thicken};
use tracemark_test::{RegParams, latin_font_path, tamil_font_path};

fn check_font(rp: &mut RegParams, font_path: &Path, letter: &str, word: &str) {
    let options = ScoreOptions::default();
    let scorer = Scorer::new(options.clone()).expect("scorer");

    // the thickened skeleton passes
    let a = scorer.reference(letter, font_path).expect("reference letter");
    eprintln!("  {letter}: {} px, {} strokes", a.px_size, a.strokes);
    rp.write_pix_and_check(&a.skeleton).expect("write skeleton");
    let user = thicken(&a.skeleton, 3).expect("thicken");
    let result = score_masks(&user, &a.skeleton, &options).expect("score letter");
    eprintln!(
        "  {letter} thickened: precision {:.3} completeness {:.3} -> {:.1}%",
        result.precision,
        result.completeness,
        result.accuracy_percent()
    );
    rp.check(result.is_correct, "thickened skeleton passes");
    rp.check(result.accuracy_percent() >= 90.0, "thickened skeleton scores >= 90");

    // the same drawing through the encoded entry points
    let drawing = rgba_from_mask(&user).expect("rgba");
    let png = tracemark_io::write_png_bytes(&drawing).expect("encode");
    let outcome = score(&png, letter, font_path, 256);
    rp.check(outcome.success, "encoded drawing is scored");
    rp.check(outcome.is_correct, "encoded drawing passes");
    let url = tracemark_io::encode_data_url(&png, "image/png");
    let from_url = score_data_url(&url, letter, font_path, 256);
    rp.compare_values(outcome.accuracy_percent, from_url.accuracy_percent, 0.0);

    // a single dot fails
    let reference = scorer.reference(word, font_path).expect("reference word");
    let dot = mask_from_points(256, 256, &[(128, 128)]).expect("dot");
    let result = score_masks(&dot, &reference.skeleton, &options).expect("score dot");
    eprintln!(
        "  {word} dot: precision {:.3} completeness {:.3} -> {:.1}%",
        result.precision,
        result.completeness,
        result.accuracy_percent()
    );
    rp.check(!result.is_correct, "single dot fails");
    rp.check(result.accuracy_percent() <= 10.0, "single dot scores near zero");

    // references are cached
    let again = scorer.reference(letter, font_path).expect("cached letter");
    rp.check(std::sync::Arc::ptr_eq(&a, &again), "reference is built once");
    rp.compare_values(2.0, scorer.cache().len() as f64, 0.0);

    // text without glyphs is a failure, not a zero score
    let outcome = score(&png, "\u{10FFFD}", font_path, 256);
    let (success, message) = outcome.as_tuple();
    rp.check(!success, "uncovered text fails");
    rp.check(message.contains("no glyphs"), "failure names the missing glyphs");
    rp.compare_values(0.0, outcome.accuracy_percent, 0.0);
}

#[test]
fn latin_reg() {
    let mut rp = RegParams::new("latin");
    check_font(&mut rp, &latin_font_path(), "a", "Wg");
    assert!(rp.cleanup(), "Latin regression test failed");
}

#[test]
#[ignore = "needs a Tamil font; set TRACEMARK_TAMIL_FONT and run with --ignored"]
fn tamil_reg() {
    let font_path = tamil_font_path().expect("Tamil font");
    let mut rp = RegParams::new("tamil");
    check_font(&mut rp, &font_path, "அ", "தண்ணீர்");
    assert!(rp.cleanup(), "Tamil regression test failed");
}
