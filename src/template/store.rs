//! Template asset loading.

use crate::image::PixelBuffer;
use crate::template::Template;
use crate::util::{LiveMatchError, LiveMatchResult};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of raw template images, addressed by key.
pub trait TemplateStore: Send + Sync {
    /// Loads the raw pixels for `key`, or `TemplateNotFound`.
    fn load_template(&self, key: &str) -> LiveMatchResult<PixelBuffer>;
}

/// In-memory store for embedding hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    assets: RwLock<HashMap<String, PixelBuffer>>,
}

impl MemoryTemplateStore {
    pub fn insert(&self, key: impl Into<String>, pixels: PixelBuffer) {
        self.assets.write().insert(key.into(), pixels);
    }

    pub fn len(&self) -> usize {
        self.assets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.read().is_empty()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn load_template(&self, key: &str) -> LiveMatchResult<PixelBuffer> {
        self.assets
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| LiveMatchError::TemplateNotFound { key: key.to_string() })
    }
}

#[cfg(feature = "image-io")]
mod dir {
    use super::TemplateStore;
    use crate::image::{io::load_pixels, PixelBuffer};
    use crate::util::{LiveMatchError, LiveMatchResult};
    use std::path::PathBuf;

    /// Store backed by image files under a directory; `key` is the file
    /// name relative to the root.
    #[derive(Clone, Debug)]
    pub struct DirTemplateStore {
        root: PathBuf,
    }

    impl DirTemplateStore {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }
    }

    impl TemplateStore for DirTemplateStore {
        fn load_template(&self, key: &str) -> LiveMatchResult<PixelBuffer> {
            let path = self.root.join(key);
            if !path.is_file() {
                return Err(LiveMatchError::TemplateNotFound { key: key.to_string() });
            }
            load_pixels(path)
        }
    }
}

#[cfg(feature = "image-io")]
pub use dir::DirTemplateStore;

/// Loads each template once and shares it afterwards, so its variant
/// cache survives across searches.
pub struct TemplateLibrary<S> {
    store: S,
    loaded: Mutex<HashMap<String, Arc<Template>>>,
}

impl<S: TemplateStore> TemplateLibrary<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the template for `key`, loading it on first request.
    pub fn get(&self, key: &str) -> LiveMatchResult<Arc<Template>> {
        let mut loaded = self.loaded.lock();
        if let Some(template) = loaded.get(key) {
            return Ok(Arc::clone(template));
        }
        let pixels = self.store.load_template(key)?;
        let template = Arc::new(Template::new(key, pixels));
        loaded.insert(key.to_string(), Arc::clone(&template));
        Ok(template)
    }

    /// Number of templates loaded so far.
    pub fn len(&self) -> usize {
        self.loaded.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.lock().is_empty()
    }
}
