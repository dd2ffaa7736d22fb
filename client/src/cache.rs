use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use hashblog_shared::Article;
use lru::LruCache;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

/// Per-slug article cache owned by one client.
///
/// Bounded LRU with no TTL. Alongside the entries it hands out one async gate
/// per slug so that concurrent misses for the same slug resolve once.
pub struct ArticleCache {
    entries: Mutex<LruCache<String, Arc<Article>>>,
    gates: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ArticleCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, slug: &str) -> Option<Arc<Article>> {
        self.entries.lock().get(slug).cloned()
    }

    pub fn insert(&self, slug: &str, article: Arc<Article>) {
        self.entries.lock().put(slug.to_string(), article);
    }

    /// Drop one entry. Returns whether it was cached.
    pub fn invalidate(&self, slug: &str) -> bool {
        self.entries.lock().pop(slug).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gate shared by every caller currently resolving `slug`.
    pub(crate) fn gate(&self, slug: &str) -> SlugGate<'_> {
        let lock = self
            .gates
            .lock()
            .entry(slug.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();
        SlugGate {
            cache: self,
            slug: slug.to_string(),
            lock: Some(lock),
        }
    }

    /// Slugs that currently have a live gate.
    pub(crate) fn gate_count(&self) -> usize {
        self.gates.lock().len()
    }
}

/// Handle on one slug's gate. The last handle to drop removes the slug's
/// entry, including when the owning future is cancelled mid-fetch.
pub(crate) struct SlugGate<'a> {
    cache: &'a ArticleCache,
    slug: String,
    // `None` only while dropping.
    lock: Option<Arc<AsyncMutex<()>>>,
}

impl SlugGate<'_> {
    pub(crate) async fn lock(&self) -> Option<AsyncMutexGuard<'_, ()>> {
        Some(self.lock.as_ref()?.lock().await)
    }
}

impl Drop for SlugGate<'_> {
    fn drop(&mut self) {
        let mut gates = self.cache.gates.lock();
        // Release our reference under the map lock so concurrent drops see
        // an exact count.
        drop(self.lock.take());
        if gates
            .get(&self.slug)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            gates.remove(&self.slug);
        }
    }
}
