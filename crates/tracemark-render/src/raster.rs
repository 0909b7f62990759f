//! Text rasterization
//!
//! Text is laid out as an SVG `<text>` element and drawn with resvg. usvg
//! shapes each run with rustybuzz, so the font's GSUB and GPOS tables
//! apply: Tamil conjuncts, reordered vowel signs and positioned marks come
//! out as the font designs them. The anti-aliased coverage is cut at half
//! to give a 1-bpp mask.

use crate::fit::TextRasterizer;
use crate::font::{FontHandle, source_path};
use crate::{RenderError, RenderResult};
use resvg::render;
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};
use tracemark_core::{Pix, PixelDepth};
use usvg::{Options, Tree, fontdb};

/// Alpha above which a rendered pixel is ink
const COVERAGE_CUTOFF: u8 = 127;

/// Escape text for use as XML character data
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// One line of text at `px_size`, baseline two ems down
///
/// The document size only sets the viewport; ink outside it is kept in the
/// tree and located through its bounding box.
fn text_svg(text: &str, px_size: u32) -> String {
    let chars = text.chars().count() as u32;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><text x="{px}" y="{baseline}" font-size="{px}" fill="black">{body}</text></svg>"#,
        w = px_size.saturating_mul(chars.saturating_add(2)),
        h = px_size.saturating_mul(3),
        px = px_size,
        baseline = px_size.saturating_mul(2),
        body = escape_xml(text),
    )
}

/// Threshold the alpha channel of a rendered pixmap into a mask
fn coverage_mask(pixmap: &Pixmap) -> RenderResult<Pix> {
    let mut pm = Pix::new(pixmap.width(), pixmap.height(), PixelDepth::Bit1)?.to_mut();
    let width = pixmap.width() as usize;
    for (i, px) in pixmap.data().chunks_exact(4).enumerate() {
        if px[3] > COVERAGE_CUTOFF {
            pm.set_pixel_unchecked((i % width) as u32, (i / width) as u32, 1);
        }
    }
    Ok(pm.into())
}

/// Rasterizes text with a loaded font
///
/// The font is registered in a private font database, so text never falls
/// back to another installed face.
#[derive(Debug, Clone)]
pub struct FontRasterizer {
    font: FontHandle,
    fontdb: Arc<fontdb::Database>,
    family: String,
}

impl FontRasterizer {
    /// Create a rasterizer for a font
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::FontLoad`] if the font database finds no
    /// named face in the font data.
    pub fn new(font: FontHandle) -> RenderResult<Self> {
        let mut db = fontdb::Database::new();
        db.load_font_data(font.data().to_vec());
        let family = db
            .faces()
            .find(|info| info.index == font.index())
            .or_else(|| db.faces().next())
            .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| RenderError::FontLoad {
                path: source_path(font.source()),
                message: "font has no family name".to_string(),
            })?;
        Ok(Self {
            font,
            fontdb: Arc::new(db),
            family,
        })
    }

    /// The font in use
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Family name the text is set in
    pub fn family(&self) -> &str {
        &self.family
    }

    fn options(&self) -> Options<'static> {
        Options {
            font_family: self.family.clone(),
            fontdb: Arc::clone(&self.fontdb),
            ..Options::default()
        }
    }
}

impl TextRasterizer for FontRasterizer {
    fn rasterize(&self, text: &str, px_size: u32) -> RenderResult<Option<Pix>> {
        if px_size == 0 || text.chars().all(|c| c.is_whitespace() || c.is_control()) {
            return Ok(None);
        }
        let tree = Tree::from_str(&text_svg(text, px_size), &self.options())
            .map_err(|e| RenderError::Raster(e.to_string()))?;
        if !tree.root().has_children() {
            return Ok(None);
        }

        let bbox = tree.root().abs_bounding_box();
        let left = bbox.left().floor();
        let top = bbox.top().floor();
        let width = (bbox.right().ceil() - left) as u32;
        let height = (bbox.bottom().ceil() - top) as u32;
        let Some(mut pixmap) = Pixmap::new(width.max(1), height.max(1)) else {
            return Ok(None);
        };
        render(&tree, Transform::from_translate(-left, -top), &mut pixmap.as_mut());

        Ok(coverage_mask(&pixmap)?
            .clip_to_foreground()?
            .map(|(ink, _)| ink))
    }
}
