use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    array::{Array, ConstantArray},
    cache::{ArrayCache, CachedArray},
    config::{ArrayConfig, ArrayRecipe},
    errors::ArrayConfigError,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverMetrics {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub arrays_created: u64,
}

#[derive(Default)]
struct MetricsCounters {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    arrays_created: AtomicU64,
}

/// Turns config trees into arrays, sharing every array resolved under a name.
///
/// Two configs that derive from the same source name get the same source
/// `Arc`. Resolving a different config under a name that is already cached
/// fails instead of silently returning the cached array.
#[derive(Default)]
pub struct ArrayResolver {
    cache: ArrayCache,
    metrics: MetricsCounters,
}

impl ArrayResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, config: &ArrayConfig) -> Result<Arc<dyn Array>, ArrayConfigError> {
        let name = config.name();
        if let Some(cached) = self.cache.get(name) {
            if cached.config != *config {
                return Err(ArrayConfigError::invalid_config(format!(
                    "array `{name}` is already defined by a different config"
                )));
            }
            self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("resolved `{name}` from cache");
            return Ok(cached.array);
        }
        self.metrics.cache_misses.fetch_add(1, Ordering::Relaxed);

        config.verify()?;
        let array: Arc<dyn Array> = match config {
            ArrayConfig::Constant(constant) => {
                let source = self.resolve(constant.source_array_config())?;
                Arc::new(ConstantArray::new(constant, source))
            }
            other => other.create_array()?,
        };
        // A nested node may have claimed this name while the tree was resolving.
        let entry = self.cache.get_or_insert(
            name,
            CachedArray {
                config: config.clone(),
                array,
            },
        );
        if entry.config != *config {
            return Err(ArrayConfigError::invalid_config(format!(
                "array `{name}` is already defined by a different config"
            )));
        }
        self.metrics.arrays_created.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "created {} array `{name}` with shape {:?}",
            config.kind().as_str(),
            entry.array.shape()
        );
        Ok(entry.array)
    }

    pub fn cached(&self, name: &str) -> Option<Arc<dyn Array>> {
        self.cache.get(name).map(|entry| entry.array)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn evict(&self, name: &str) -> bool {
        self.cache.remove(name).is_some()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn metrics_snapshot(&self) -> ResolverMetrics {
        ResolverMetrics {
            cache_hits: self.metrics.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.metrics.cache_misses.load(Ordering::Relaxed),
            arrays_created: self.metrics.arrays_created.load(Ordering::Relaxed),
        }
    }

    pub fn reset_metrics(&self) {
        self.metrics.cache_hits.store(0, Ordering::Relaxed);
        self.metrics.cache_misses.store(0, Ordering::Relaxed);
        self.metrics.arrays_created.store(0, Ordering::Relaxed);
    }
}
