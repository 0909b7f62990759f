//! tracemark-test - Regression harness for the tracemark crates
//!
//! A regression test opens a [`RegParams`], records numbered checks, and
//! asserts on [`RegParams::cleanup`]. `REGTEST_MODE` picks what happens
//! to images passed to [`RegParams::write_pix_and_check`]:
//!
//! - `compare` (default): match against `tests/golden`, when a golden exists
//! - `generate`: write new goldens
//! - `display`: write to `tests/regout` for inspection
//!
//! ```ignore
//! use tracemark_test::RegParams;
//!
//! let mut rp = RegParams::new("scorer");
//! rp.compare_values(1.0, score, 0.01);
//! assert!(rp.cleanup());
//! ```
//!
//! Synthetic canvas drawings come from [`synth`]. Fonts for reference
//! rendering come from `tests/data/fonts` ([`latin_font_path`]) or, for
//! Tamil, from the file named by `TRACEMARK_TAMIL_FONT`
//! ([`tamil_font_path`]).

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    // this crate lives at crates/tracemark-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Path of a file under `tests/data`
pub fn test_data_path(name: &str) -> PathBuf {
    workspace_root().join("tests/data").join(name)
}

/// Bundled Latin font (Tuffy, public domain)
pub fn latin_font_path() -> PathBuf {
    test_data_path("fonts/Tuffy.ttf")
}

/// Variable naming a Tamil font file for the Tamil regression tests
pub const TAMIL_FONT_ENV: &str = "TRACEMARK_TAMIL_FONT";

/// Tamil font named by [`TAMIL_FONT_ENV`]
///
/// # Errors
///
/// Returns [`TestError::MissingFont`] when the variable is unset or names
/// no file.
pub fn tamil_font_path() -> TestResult<PathBuf> {
    let path = std::env::var_os(TAMIL_FONT_ENV)
        .map(PathBuf::from)
        .ok_or_else(|| TestError::MissingFont(format!("{TAMIL_FONT_ENV} is not set")))?;
    if !path.is_file() {
        return Err(TestError::MissingFont(format!(
            "{TAMIL_FONT_ENV}={} is not a file",
            path.display()
        )));
    }
    Ok(path)
}

/// Directory of golden images
pub fn golden_dir() -> PathBuf {
    workspace_root().join("tests/golden")
}

/// Directory for images written in display mode
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests/regout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_font_present() {
        let path = latin_font_path();
        assert!(path.is_file(), "missing {}", path.display());
        assert!(test_data_path("fonts/Tuffy-LICENSE.txt").is_file());
    }
}
