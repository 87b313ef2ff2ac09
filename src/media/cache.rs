// SPDX-License-Identifier: MPL-2.0
//! LRU cache for decoded images, keyed by source URL.
//!
//! Gallery thumbnails and editor reopens hit the same remote URLs
//! repeatedly; caching the decoded surface avoids refetching and
//! redecoding. Entries share ownership via `Arc` so a cache eviction never
//! invalidates an image still displayed somewhere.

use image_rs::DynamicImage;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default cache capacity, in decoded images.
const DEFAULT_CAPACITY: usize = 64;

pub struct ImageCache {
    entries: LruCache<String, Arc<DynamicImage>>,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.entries.len())
            .field("cap", &self.entries.cap())
            .finish()
    }
}

impl ImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity).expect("capacity must be nonzero")),
        }
    }

    /// Looks up a decoded image, refreshing its recency.
    pub fn get(&mut self, url: &str) -> Option<Arc<DynamicImage>> {
        self.entries.get(url).cloned()
    }

    /// Inserts a decoded image, evicting the least recently used entry if
    /// the cache is full. Returns the shared handle.
    pub fn insert(&mut self, url: &str, image: DynamicImage) -> Arc<DynamicImage> {
        let shared = Arc::new(image);
        self.insert_shared(url, Arc::clone(&shared));
        shared
    }

    /// Inserts an already-shared decoded image.
    pub fn insert_shared(&mut self, url: &str, image: Arc<DynamicImage>) {
        self.entries.put(url.to_string(), image);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}
