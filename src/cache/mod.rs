//! Content cache for loaded articles
//!
//! Entries are valid for a fixed window after insertion and the cache holds
//! a bounded number of them. When full, the entry inserted earliest is
//! evicted; reads do not refresh an entry's position.

use indexmap::IndexMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;
use crate::content::Article;

/// Which entry goes when the cache is over capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Oldest by insertion time, regardless of how often it was read
    #[default]
    InsertionOrder,
}

/// A cached article and when it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub article: Arc<Article>,
    pub inserted_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, expiry: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) < expiry
    }
}

/// Article cache keyed by slug
#[derive(Debug, Clone)]
pub struct ContentCache {
    /// Kept in insertion order, front is oldest
    entries: IndexMap<String, CacheEntry>,
    expiry: Duration,
    capacity: usize,
    policy: EvictionPolicy,
}

impl ContentCache {
    pub fn new(expiry: Duration, capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            expiry,
            capacity,
            policy: EvictionPolicy::InsertionOrder,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.expiry(), config.capacity)
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Fresh article for `slug`, if any
    pub fn get(&self, slug: &str) -> Option<Arc<Article>> {
        self.get_at(slug, Instant::now())
    }

    pub fn get_at(&self, slug: &str, now: Instant) -> Option<Arc<Article>> {
        match self.entries.get(slug) {
            Some(entry) if entry.is_fresh(now, self.expiry) => {
                tracing::debug!("Cache hit for {}", slug);
                Some(Arc::clone(&entry.article))
            }
            Some(_) => {
                tracing::debug!("Cache entry for {} has expired", slug);
                None
            }
            None => {
                tracing::debug!("Cache miss for {}", slug);
                None
            }
        }
    }

    /// Store an article, replacing any previous entry for the same slug
    pub fn insert(&mut self, slug: &str, article: Arc<Article>) {
        self.insert_at(slug, article, Instant::now());
    }

    pub fn insert_at(&mut self, slug: &str, article: Arc<Article>, now: Instant) {
        // A replaced entry counts as newly inserted
        self.entries.shift_remove(slug);
        self.entries.insert(
            slug.to_string(),
            CacheEntry {
                article,
                inserted_at: now,
            },
        );

        while self.entries.len() > self.capacity {
            match self.policy {
                EvictionPolicy::InsertionOrder => {
                    if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                        tracing::debug!("Evicted {} from article cache", evicted);
                    }
                }
            }
        }
    }

    /// Whether an entry is stored, fresh or not
    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Slugs from oldest to newest insertion
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
