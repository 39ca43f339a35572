//! Templates and their cached preprocessed variants.

mod plan;
mod store;
mod variants;

pub use plan::TemplatePlan;
#[cfg(feature = "image-io")]
pub use store::DirTemplateStore;
pub use store::{MemoryTemplateStore, TemplateLibrary, TemplateStore};
pub use variants::VariantCache;

use crate::image::{PixelBuffer, Plane};
use crate::preprocess::PreprocessKey;
use crate::search::MatchOptions;
use crate::util::LiveMatchResult;
use std::fmt;
use std::sync::Arc;

/// Identity of a template, used to key remembered hit positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(Arc<str>);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw template pixels plus a cache of preprocessed variants.
///
/// The raw buffer is immutable; variants are derived from it on first use
/// per `PreprocessKey` and reused by every later search, from any thread.
#[derive(Debug)]
pub struct Template {
    id: TemplateId,
    pixels: PixelBuffer,
    variants: VariantCache,
}

impl Template {
    pub fn new(id: impl Into<TemplateId>, pixels: PixelBuffer) -> Self {
        Self {
            id: id.into(),
            pixels,
            variants: VariantCache::default(),
        }
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Returns the width in pixels of the raw template.
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    /// Returns the height in pixels of the raw template.
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Returns an owned copy of the variant for `key`, deriving it on first use.
    pub fn variant(&self, key: &PreprocessKey) -> LiveMatchResult<Plane> {
        self.variants.get_or_create(&self.pixels, key)
    }

    /// Returns an owned copy of the variant the given options search with.
    pub fn variant_for(&self, options: &MatchOptions) -> LiveMatchResult<Plane> {
        self.variant(&options.preprocess_key())
    }

    pub(crate) fn shared_variant(&self, key: &PreprocessKey) -> LiveMatchResult<Arc<Plane>> {
        self.variants.shared(&self.pixels, key)
    }

    /// Keys with a cached variant.
    pub fn cached_keys(&self) -> Vec<PreprocessKey> {
        self.variants.keys()
    }
}
