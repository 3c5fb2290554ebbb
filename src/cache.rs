use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::{array::Array, config::ArrayConfig};

#[derive(Clone, Debug)]
pub struct CachedArray {
    pub config: ArrayConfig,
    pub array: Arc<dyn Array>,
}

/// Resolved arrays keyed by config name.
#[derive(Default)]
pub struct ArrayCache {
    inner: RwLock<AHashMap<String, CachedArray>>,
}

impl ArrayCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AHashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<CachedArray> {
        self.inner.read().get(name).cloned()
    }

    pub fn insert(&self, name: String, value: CachedArray) {
        self.inner.write().insert(name, value);
    }

    /// Inserts `value` unless `name` is taken, returning the entry that ends up cached.
    pub fn get_or_insert(&self, name: &str, value: CachedArray) -> CachedArray {
        self.inner
            .write()
            .entry(name.to_string())
            .or_insert(value)
            .clone()
    }

    pub fn remove(&self, name: &str) -> Option<CachedArray> {
        self.inner.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }
}
