//! tracemark-render - Reference text rendering
//!
//! This crate provides:
//!
//! - **Font loading** - Font files cached by path, with a system default
//!   font standing in for files that fail to load
//! - **Text rasterization** - Shaped text drawn through resvg, thresholded
//!   to a mask
//! - **Fitting** - The largest pixel size whose ink fits the canvas, centered
//!
//! # Examples
//!
//! ```no_run
//! use tracemark_render::{RenderOptions, render_reference};
//!
//! let rendered = render_reference("அ", "fonts/tamil.ttf", 256, &RenderOptions::default())?;
//! assert_eq!(rendered.mask.width(), 256);
//! # Ok::<(), tracemark_render::RenderError>(())
//! ```

mod error;
pub mod fit;
pub mod font;
pub mod raster;

pub use error::{RenderError, RenderResult};
pub use fit::{
    FittedText, RenderOptions, RenderedText, TextRasterizer, fit_text, render_reference,
    render_text,
};
pub use font::{
    FontData, FontHandle, FontSource, default_font, find_system_font, load_font,
    load_font_or_fallback, resolve_font,
};
pub use raster::FontRasterizer;
