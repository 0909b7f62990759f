//! Reference cache
//!
//! References are built once per `(text, font path, canvas size)` and
//! shared behind `Arc`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use tracemark_core::Pix;
use tracemark_render::FontSource;
use tracing::debug;

/// A rendered, normalized and thinned reference
#[derive(Debug, Clone)]
pub struct Reference {
    /// Normalized reference mask
    pub mask: Pix,
    /// Skeleton of `mask`
    pub skeleton: Pix,
    /// Pixel size the text was drawn at
    pub px_size: u32,
    /// Number of connected strokes in the skeleton
    pub strokes: usize,
    /// Font the text was drawn with
    pub font: FontSource,
}

/// Cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub text: String,
    pub font_path: PathBuf,
    pub canvas_size: u32,
}

impl ReferenceKey {
    pub fn new(text: &str, font_path: impl AsRef<Path>, canvas_size: u32) -> Self {
        Self {
            text: text.to_string(),
            font_path: font_path.as_ref().to_path_buf(),
            canvas_size,
        }
    }
}

/// Thread-safe, insert-if-absent store of built references
///
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    entries: RwLock<HashMap<ReferenceKey, Arc<Reference>>>,
}

impl ReferenceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a reference
    pub fn get(&self, key: &ReferenceKey) -> Option<Arc<Reference>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    /// Insert a reference unless one is already cached for `key`
    ///
    /// Returns the cached reference, which is `reference` only if the key
    /// was absent.
    pub fn insert(&self, key: ReferenceKey, reference: Reference) -> Arc<Reference> {
        let reference = Arc::new(reference);
        match self.entries.write() {
            Ok(mut entries) => Arc::clone(entries.entry(key).or_insert(reference)),
            Err(_) => reference,
        }
    }

    /// Return the cached reference for `key`, building it on a miss
    ///
    /// `build` runs outside the lock, so two threads missing on the same
    /// key may both build; the first insert wins and both get it.
    pub fn get_or_build<E>(
        &self,
        key: ReferenceKey,
        build: impl FnOnce() -> Result<Reference, E>,
    ) -> Result<Arc<Reference>, E> {
        if let Some(reference) = self.get(&key) {
            debug!("Reference cache hit for {:?}", key.text);
            return Ok(reference);
        }
        let reference = build()?;
        Ok(self.insert(key, reference))
    }

    /// Number of cached references
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// True if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The process-wide cache behind [`crate::score`]
pub fn global_reference_cache() -> &'static Arc<ReferenceCache> {
    static CACHE: OnceLock<Arc<ReferenceCache>> = OnceLock::new();
    CACHE.get_or_init(|| Arc::new(ReferenceCache::new()))
}
