//! Numbered regression checks

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use std::fs;
use std::path::Path;
use tracemark_core::{Pix, PixelDepth};

/// What happens to images handed to [`RegParams::write_pix_and_check`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Write goldens
    Generate,
    /// Match against goldens
    #[default]
    Compare,
    /// Write images for inspection only
    Display,
}

impl RegTestMode {
    /// Read `REGTEST_MODE`; anything unrecognized means compare
    pub fn from_env() -> Self {
        let value = std::env::var("REGTEST_MODE").unwrap_or_default();
        match value.to_ascii_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test
///
/// Every check bumps the index, so a failure report names the check by
/// number. Failures are collected, not raised, until [`cleanup`].
///
/// [`cleanup`]: RegParams::cleanup
pub struct RegParams {
    /// Test name, used in file names and reports
    pub test_name: String,
    /// Image handling mode
    pub mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test, taking the mode from `REGTEST_MODE`
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        if mode != RegTestMode::Compare {
            // write failures surface later, from write_pix_and_check
            let _ = fs::create_dir_all(golden_dir());
            let _ = fs::create_dir_all(regout_dir());
        }
        eprintln!("\n==== {test_name}_reg ({mode:?}) ====");

        Self {
            test_name: test_name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks recorded so far
    pub fn index(&self) -> usize {
        self.index
    }

    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!("{}_reg #{}: {}", self.test_name, self.index, detail());
            eprintln!("{msg}");
            self.failures.push(msg);
        }
        ok
    }

    /// Check that `actual` is within `delta` of `expected`
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!("expected {expected}, got {actual} (off by {diff}, allowed {delta})")
        })
    }

    /// Check a condition; `what` names it in the report
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.record(ok, || format!("not true: {what}"))
    }

    /// Check that two images have the same size, depth and pixels
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        let same = pix1.depth() == pix2.depth() && pixels_match(pix1, pix2, |a, b| a == b);
        self.record(same, || {
            format!(
                "images differ: {}x{} @{}bpp vs {}x{} @{}bpp",
                pix1.width(),
                pix1.height(),
                pix1.depth().bits(),
                pix2.width(),
                pix2.height(),
                pix2.depth().bits()
            )
        })
    }

    /// Handle an output image according to the mode
    ///
    /// In compare mode a missing golden is skipped, not failed. Goldens
    /// are PNG, and masks come back from PNG as 8 bpp, so a mask matches
    /// when its ink and the golden's nonzero pixels agree.
    pub fn write_pix_and_check(&mut self, pix: &Pix) -> TestResult<()> {
        let n = self.index + 1;
        let golden = golden_dir().join(format!("{}_golden.{n:02}.png", self.test_name));

        match self.mode {
            RegTestMode::Generate => {
                self.index = n;
                write_png(pix, &golden)?;
                eprintln!("wrote {}", golden.display());
            }
            RegTestMode::Display => {
                self.index = n;
                let out = regout_dir().join(format!("{}.{n:02}.png", self.test_name));
                write_png(pix, &out)?;
            }
            RegTestMode::Compare if !golden.exists() => {
                self.index = n;
                eprintln!("no golden {}; skipped", golden.display());
            }
            RegTestMode::Compare => {
                let same = tracemark_io::read_image(&golden)
                    .map(|g| matches_golden(pix, &g))
                    .unwrap_or(false);
                self.record(same, || format!("differs from {}", golden.display()));
            }
        }
        Ok(())
    }

    /// Print the summary and return whether every check passed
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("{}_reg: all {} checks passed\n", self.test_name, self.index);
            return true;
        }
        eprintln!(
            "{}_reg: {} of {} checks failed",
            self.test_name,
            self.failures.len(),
            self.index
        );
        for failure in &self.failures {
            eprintln!("  {failure}");
        }
        false
    }

    /// True while no check has failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reports of the failed checks
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn write_png(pix: &Pix, path: &Path) -> TestResult<()> {
    tracemark_io::write_image(pix, path).map_err(|e| TestError::ImageWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn pixels_match(a: &Pix, b: &Pix, same: impl Fn(u32, u32) -> bool) -> bool {
    a.sizes_equal(b)
        && (0..a.height()).all(|y| {
            (0..a.width()).all(|x| same(a.get_pixel_unchecked(x, y), b.get_pixel_unchecked(x, y)))
        })
}

fn matches_golden(pix: &Pix, golden: &Pix) -> bool {
    if pix.depth() == PixelDepth::Bit1 {
        pixels_match(pix, golden, |a, b| (a != 0) == (b != 0))
    } else {
        pixels_match(pix, golden, |a, b| a == b)
    }
}
