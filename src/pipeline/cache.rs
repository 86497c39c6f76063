use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;

use crate::core::types::Place;

/// Process-wide retrieval memo keyed by the exact query text.
/// Unbounded unless built with a capacity, in which case least recently used entries go first.
pub struct RetrievalCache {
    cache: Mutex<LruCache<String, Vec<Place>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl RetrievalCache {
    pub fn new() -> Self {
        Self::from_lru(LruCache::unbounded())
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::from_lru(LruCache::new(capacity))
    }

    pub fn from_capacity(capacity: Option<usize>) -> Self {
        match capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::with_capacity(capacity),
            None => Self::new(),
        }
    }

    fn from_lru(cache: LruCache<String, Vec<Place>>) -> Self {
        Self {
            cache: Mutex::new(cache),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, query: &str) -> Option<Vec<Place>> {
        let mut cache = self.cache.lock();
        match cache.get(query) {
            Some(places) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(places.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn put(&self, query: &str, places: Vec<Place>) {
        self.cache.lock().put(query.to_string(), places);
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            size: self.len(),
            hit_rate: if total > 0 { hits as f64 / total as f64 } else { 0.0 },
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for RetrievalCache {
    fn default() -> Self {
        Self::new()
    }
}
