//! Injectable key-value cache for collaborator layers
//!
//! Fetch-side collaborators (school spidering, geocoding) memoize expensive
//! lookups. The cache is an explicit object with an injectable backing
//! store and read-through semantics, passed into the collaborator function
//! rather than living as module-level state.

use crate::error::{RankingError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for cache backends
pub trait KeyValueCache: Send + Sync {
    /// Get a cached value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value (write-through)
    fn put(&self, key: &str, value: String) -> Result<()>;
}

/// Read-through lookup: return the cached value or fetch, store, and return
pub fn get_or_fetch<F>(cache: &dyn KeyValueCache, key: &str, fetch: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(value) = cache.get(key)? {
        return Ok(value);
    }

    let value = fetch()?;
    cache.put(key, value.clone())?;
    Ok(value)
}

/// In-memory cache backend
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueCache for InMemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| RankingError::StoreError {
            message: "Failed to acquire cache read lock".to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| RankingError::StoreError {
            message: "Failed to acquire cache write lock".to_string(),
        })?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
