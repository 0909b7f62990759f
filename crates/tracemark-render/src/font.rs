//! Font loading and caching
//!
//! Font files are read once per path and kept for the life of the process.
//! When a file cannot be loaded, or lacks glyphs for the requested text, a
//! default font from the system font database takes its place. Text that no
//! available font can draw is an error rather than a row of `.notdef` boxes.

use crate::{RenderError, RenderResult};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, warn};
use ttf_parser::Face;

/// Families tried, in order, when resolving the default font:
/// Tamil-capable families first, then broad-coverage ones.
const FALLBACK_FAMILIES: &[&str] = &[
    "Noto Sans Tamil",
    "Noto Serif Tamil",
    "Lohit Tamil",
    "Nirmala UI",
    "Latha",
    "Tamil Sangam MN",
    "Tamil MN",
    "Noto Sans",
    "DejaVu Sans",
    "Arial Unicode MS",
    "Arial",
    "Liberation Sans",
];

/// Text every preferred default font must be able to draw
const DEFAULT_FONT_SAMPLE: &str = "அ";

/// Where font bytes came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A font file
    File(PathBuf),
    /// A face from the system font database, by family name
    System(String),
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::System(family) => write!(f, "system font {:?}", family),
        }
    }
}

/// Validated font bytes
#[derive(Debug)]
pub struct FontData {
    bytes: Vec<u8>,
    index: u32,
    source: FontSource,
}

/// Shared handle to loaded font data
pub type FontHandle = Arc<FontData>;

impl FontData {
    /// Wrap font bytes after checking that face `index` parses
    pub fn from_bytes(bytes: Vec<u8>, index: u32, source: FontSource) -> RenderResult<Self> {
        if let Err(e) = Face::parse(&bytes, index) {
            return Err(RenderError::FontLoad {
                path: source_path(&source),
                message: e.to_string(),
            });
        }
        Ok(Self {
            bytes,
            index,
            source,
        })
    }

    /// Parse the face
    pub fn face(&self) -> RenderResult<Face<'_>> {
        Face::parse(&self.bytes, self.index).map_err(|e| RenderError::FontLoad {
            path: source_path(&self.source),
            message: e.to_string(),
        })
    }

    /// The font file bytes
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Index of the face within the font file
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Where the bytes came from
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// True if the font has a glyph for every visible character of `text`
    pub fn covers(&self, text: &str) -> bool {
        match self.face() {
            Ok(face) => text
                .chars()
                .filter(|c| !c.is_whitespace() && !c.is_control())
                .all(|c| face.glyph_index(c).is_some()),
            Err(_) => false,
        }
    }
}

pub(crate) fn source_path(source: &FontSource) -> PathBuf {
    match source {
        FontSource::File(path) => path.clone(),
        FontSource::System(family) => PathBuf::from(format!("<system:{}>", family)),
    }
}

fn font_cache() -> &'static RwLock<HashMap<PathBuf, FontHandle>> {
    static CACHE: OnceLock<RwLock<HashMap<PathBuf, FontHandle>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Load a font file, caching it by path
///
/// The first face of a collection is used. Cached fonts are never
/// reloaded; concurrent first loads of the same path keep whichever
/// finished first.
///
/// # Errors
///
/// Returns [`RenderError::FontLoad`] if the file cannot be read or parsed.
pub fn load_font(path: impl AsRef<Path>) -> RenderResult<FontHandle> {
    let path = path.as_ref();
    if let Ok(cache) = font_cache().read()
        && let Some(font) = cache.get(path)
    {
        return Ok(Arc::clone(font));
    }

    let bytes = fs::read(path).map_err(|e| RenderError::FontLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let font = Arc::new(FontData::from_bytes(bytes, 0, FontSource::File(path.to_path_buf()))?);
    debug!("Loaded font {:?}", path);

    match font_cache().write() {
        Ok(mut cache) => Ok(Arc::clone(cache.entry(path.to_path_buf()).or_insert(font))),
        Err(_) => Ok(font),
    }
}

fn system_database() -> &'static fontdb::Database {
    static DB: OnceLock<fontdb::Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!("System font database: {} faces", db.len());
        db
    })
}

fn load_system_face(db: &fontdb::Database, family: fontdb::Family<'_>) -> Option<FontHandle> {
    let families = [family];
    let query = fontdb::Query {
        families: &families,
        ..Default::default()
    };
    let id = db.query(&query)?;
    let name = db
        .face(id)
        .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "sans-serif".to_string());
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    FontData::from_bytes(bytes, index, FontSource::System(name))
        .ok()
        .map(Arc::new)
}

/// Find an installed font that can draw `sample`
///
/// Tries the Tamil and broad-coverage families first, then the system
/// sans-serif, then every other installed face.
pub fn find_system_font(sample: &str) -> Option<FontHandle> {
    let db = system_database();
    let named = FALLBACK_FAMILIES
        .iter()
        .filter_map(|&name| load_system_face(db, fontdb::Family::Name(name)));
    let generic = load_system_face(db, fontdb::Family::SansSerif);

    if let Some(font) = named.chain(generic).find(|f| f.covers(sample)) {
        return Some(font);
    }

    db.faces().find_map(|info| {
        let family = info.families.first().map(|(name, _)| name.clone())?;
        let (bytes, index) = db.with_face_data(info.id, |data, index| (data.to_vec(), index))?;
        let font = FontData::from_bytes(bytes, index, FontSource::System(family)).ok()?;
        font.covers(sample).then(|| Arc::new(font))
    })
}

/// The default font, resolved once per process
///
/// Prefers a font that draws Tamil; otherwise any sans-serif face.
///
/// # Errors
///
/// Returns [`RenderError::NoFallbackFont`] if the system has no usable font.
pub fn default_font() -> RenderResult<FontHandle> {
    static DEFAULT: OnceLock<Option<FontHandle>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            let font = find_system_font(DEFAULT_FONT_SAMPLE)
                .or_else(|| load_system_face(system_database(), fontdb::Family::SansSerif));
            match &font {
                Some(f) => debug!("Default font: {:?}", f.source()),
                None => warn!("No system font found for fallback rendering"),
            }
            font
        })
        .clone()
        .ok_or(RenderError::NoFallbackFont)
}

/// Load a font file, substituting the default font on failure
pub fn load_font_or_fallback(path: impl AsRef<Path>) -> RenderResult<FontHandle> {
    match load_font(path.as_ref()) {
        Ok(font) => Ok(font),
        Err(e) => {
            warn!("{}; using the default font", e);
            default_font()
        }
    }
}

/// Pick the font to render `text` with
///
/// Loads `path` (or the default font if that fails). When the loaded font
/// lacks glyphs for `text` and the default font has them, the default font
/// is used instead.
///
/// # Errors
///
/// Returns [`RenderError::MissingGlyphs`] when neither font covers `text`.
pub fn resolve_font(path: impl AsRef<Path>, text: &str) -> RenderResult<FontHandle> {
    let font = load_font_or_fallback(path)?;
    if font.covers(text) {
        return Ok(font);
    }
    match default_font() {
        Ok(fallback) if fallback.covers(text) => {
            debug!(
                "Font {:?} lacks glyphs for {:?}; using {:?}",
                font.source(),
                text,
                fallback.source()
            );
            Ok(fallback)
        }
        _ => Err(RenderError::MissingGlyphs {
            text: text.to_string(),
            font: font.source().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load_font("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, RenderError::FontLoad { .. }));
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        let err = FontData::from_bytes(
            b"not a font".to_vec(),
            0,
            FontSource::File(PathBuf::from("junk.ttf")),
        )
        .unwrap_err();
        assert!(err.to_string().contains("junk.ttf"));
    }

    #[test]
    fn test_fallback_on_missing_file() {
        // Either a system font stands in, or the lack of one is reported
        match load_font_or_fallback("/nonexistent/font.ttf") {
            Ok(font) => assert!(matches!(font.source(), FontSource::System(_))),
            Err(e) => assert!(matches!(e, RenderError::NoFallbackFont)),
        }
    }

    #[test]
    fn test_cache_returns_same_handle() {
        let path = tracemark_test::latin_font_path();
        let a = load_font(&path).unwrap();
        let b = load_font(&path).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.covers("Wg"));
        assert_eq!(a.source().to_string(), path.display().to_string());
    }

    #[test]
    fn test_missing_glyphs() {
        let path = tracemark_test::latin_font_path();
        assert!(resolve_font(&path, "Wg").is_ok());
        match resolve_font(&path, "a\u{10FFFD}").unwrap_err() {
            RenderError::MissingGlyphs { text, font } => {
                assert_eq!(text, "a\u{10FFFD}");
                assert!(font.ends_with("Tuffy.ttf"));
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_source_display() {
        let file = FontSource::File(PathBuf::from("fonts/x.ttf"));
        assert_eq!(file.to_string(), "fonts/x.ttf");
        let system = FontSource::System("Noto Sans".into());
        assert_eq!(system.to_string(), "system font \"Noto Sans\"");
    }
}
