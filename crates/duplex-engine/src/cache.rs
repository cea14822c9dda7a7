use crate::error::TemplateError;
use crate::template::CompiledTemplate;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

/// Compiled-template cache keyed by caller-provided strings, usually the
/// template source.
///
/// Lookups take the shared lock. Compilation runs without holding any
/// lock; when two threads miss on the same key concurrently, the first
/// insert wins and the loser adopts the cached instance, so a key maps to
/// exactly one template for its lifetime in the cache.
pub struct TemplateCache {
    inner: RwLock<CacheInner>,
    capacity: Option<usize>,
}

struct CacheInner {
    map: HashMap<String, Arc<CompiledTemplate>>,
    order: VecDeque<String>,
}

impl TemplateCache {
    /// Unbounded cache.
    pub fn new() -> Self {
        TemplateCache {
            inner: RwLock::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: None,
        }
    }

    /// Cache that evicts its oldest entry once `capacity` templates are
    /// held.
    pub fn with_capacity(capacity: usize) -> Self {
        TemplateCache {
            inner: RwLock::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: Some(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<CompiledTemplate>> {
        self.read().map.get(key).cloned()
    }

    /// Returns the cached template for `key`, compiling on a miss.
    pub fn get_or_compile<F>(&self, key: &str, compile: F) -> Result<Arc<CompiledTemplate>, TemplateError>
    where
        F: FnOnce() -> Result<CompiledTemplate, TemplateError>,
    {
        if let Some(hit) = self.get(key) {
            trace!("template cache hit");
            return Ok(hit);
        }
        let compiled = Arc::new(compile()?);
        let mut inner = self.write();
        if let Some(existing) = inner.map.get(key) {
            return Ok(existing.clone());
        }
        inner.map.insert(key.to_string(), compiled.clone());
        inner.order.push_back(key.to_string());
        if let Some(capacity) = self.capacity {
            while inner.map.len() > capacity {
                match inner.order.pop_front() {
                    Some(oldest) => {
                        inner.map.remove(&oldest);
                        trace!("evicted oldest cached template");
                    }
                    None => break,
                }
            }
        }
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().map.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.write();
        inner.map.clear();
        inner.order.clear();
    }

    // Poisoning only matters if a panic unwound mid-mutation; the two
    // mutating paths cannot panic between map and order updates, so the
    // data is taken as-is.
    fn read(&self) -> RwLockReadGuard<'_, CacheInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        TemplateCache::new()
    }
}
