use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use talent_models::LanguageCode;

/// Bounded memo of detection results keyed by the exact input text.
///
/// When full, inserting evicts the least-recently-used entry. Lookups count
/// as use.
pub struct DetectionCache {
    inner: Mutex<LruCache<String, LanguageCode>>,
}

impl DetectionCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// `None` when `capacity` is zero, meaning caching is disabled.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::new)
    }

    pub fn get(&self, text: &str) -> Option<LanguageCode> {
        self.lock().get(text).copied()
    }

    pub fn insert(&self, text: &str, language: LanguageCode) {
        self.lock().put(text.to_string(), language);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    // Entries are plain values, so a poisoned lock still holds a usable cache.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, LanguageCode>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DetectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
