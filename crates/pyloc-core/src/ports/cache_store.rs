//! Persistent snapshot storage for discovery results.
//!
//! The caching locator writes every successful discovery through to a store so
//! a later process can show the previous result while it rediscovers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::CacheStoreError;
use crate::domain::{Interpreter, ScopeKey};

/// Storage for the last known interpreter list of each cache key.
#[async_trait]
pub trait InterpreterCacheStore: Send + Sync {
    /// Load the stored snapshot for `key`, if any.
    async fn load(&self, key: &ScopeKey) -> Result<Option<Vec<Interpreter>>, CacheStoreError>;

    /// Replace the stored snapshot for `key`.
    async fn save(&self, key: &ScopeKey, interpreters: &[Interpreter])
    -> Result<(), CacheStoreError>;

    /// Remove every stored snapshot. Returns how many were removed.
    async fn clear(&self) -> Result<usize, CacheStoreError>;
}

/// A store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheStore;

#[async_trait]
impl InterpreterCacheStore for NoopCacheStore {
    async fn load(&self, _key: &ScopeKey) -> Result<Option<Vec<Interpreter>>, CacheStoreError> {
        Ok(None)
    }

    async fn save(
        &self,
        _key: &ScopeKey,
        _interpreters: &[Interpreter],
    ) -> Result<(), CacheStoreError> {
        Ok(())
    }

    async fn clear(&self) -> Result<usize, CacheStoreError> {
        Ok(0)
    }
}

/// In-process store, useful for hosts that keep one long-lived process.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    snapshots: Mutex<HashMap<ScopeKey, Vec<Interpreter>>>,
}

impl MemoryCacheStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InterpreterCacheStore for MemoryCacheStore {
    async fn load(&self, key: &ScopeKey) -> Result<Option<Vec<Interpreter>>, CacheStoreError> {
        let snapshots = self
            .snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(snapshots.get(key).cloned())
    }

    async fn save(
        &self,
        key: &ScopeKey,
        interpreters: &[Interpreter],
    ) -> Result<(), CacheStoreError> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), interpreters.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<usize, CacheStoreError> {
        let mut snapshots = self
            .snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let count = snapshots.len();
        snapshots.clear();
        Ok(count)
    }
}
