//! Write-once cache of preprocessed template variants.
//!
//! Grayscale, blur and edge transforms do not depend on the search scale,
//! so each `PreprocessKey` is computed once per template and shared across
//! scales, polls and threads. Per-scale resizing is left to the matcher.
//! Entries are published behind `Arc` and never mutated afterwards; when two
//! threads derive the same key concurrently the first insert wins.

use crate::image::{PixelBuffer, Plane};
use crate::preprocess::{self, PreprocessKey};
use crate::util::LiveMatchResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Concurrent `PreprocessKey -> Plane` store.
#[derive(Debug, Default)]
pub struct VariantCache {
    entries: RwLock<HashMap<PreprocessKey, Arc<Plane>>>,
}

impl VariantCache {
    /// Returns an owned clone of the cached variant, deriving it from `raw`
    /// if this key has not been seen yet.
    pub fn get_or_create(&self, raw: &PixelBuffer, key: &PreprocessKey) -> LiveMatchResult<Plane> {
        Ok(self.shared(raw, key)?.as_ref().clone())
    }

    pub(crate) fn shared(
        &self,
        raw: &PixelBuffer,
        key: &PreprocessKey,
    ) -> LiveMatchResult<Arc<Plane>> {
        if let Some(plane) = self.entries.read().get(key) {
            return Ok(Arc::clone(plane));
        }

        // Derive outside the lock; preprocessing a large template is slow.
        let derived = Arc::new(preprocess::apply(raw, None, key)?);
        let mut entries = self.entries.write();
        let entry = entries.entry(*key).or_insert(derived);
        Ok(Arc::clone(entry))
    }

    pub fn contains(&self, key: &PreprocessKey) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn keys(&self) -> Vec<PreprocessKey> {
        self.entries.read().keys().copied().collect()
    }
}
