//! Caching layer that turns any discovery strategy into a locator.
//!
//! # Coordination
//!
//! Each cache key owns one entry with a small state machine:
//!
//! ```text
//! Empty --query--> Populating --success--> Populated
//!   ^                  |                       |
//!   +----failure-------+                       |
//!   +-------------------invalidate-------------+
//! ```
//!
//! The key map only takes its write lock to insert new entries, so unrelated
//! scopes never wait on each other. Within an entry a short synchronous lock
//! guards the state; it is never held across an await.
//!
//! A discovery runs in its own task and always runs to completion, even when
//! the caller that triggered it goes away. Its outcome is broadcast to every
//! waiter through a `watch` channel. Invalidation bumps the entry generation:
//! an in-flight discovery from an older generation still answers its own
//! waiters but no longer repopulates the entry. Discoveries for one key are
//! additionally serialized by a per-entry run lock, so a refresh started after
//! an invalidation waits for the older run to finish.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;
use futures_util::FutureExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{Interpreter, Scope, ScopeKey, dedupe_by_path};
use crate::ports::{
    DiscoveryStrategy, InterpreterCacheStore, InterpreterLocator, LocatorError, NoopCacheStore,
};
use crate::settings::DiscoverySettings;

/// Result of one discovery run, shared by every waiter.
type Outcome = Result<Arc<Vec<Interpreter>>, LocatorError>;

/// Caching behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Keep one entry per scope. When false every scope shares the global entry.
    pub cache_per_scope: bool,
    /// While an entry is being (re)discovered, answer from the persisted
    /// snapshot if the store has one instead of waiting.
    pub serve_persisted_while_refreshing: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            cache_per_scope: true,
            serve_persisted_while_refreshing: false,
        }
    }
}

impl LocatorOptions {
    /// Build options from discovery settings.
    pub fn from_settings(settings: &DiscoverySettings) -> Self {
        Self {
            cache_per_scope: settings.effective_cache_per_scope(),
            serve_persisted_while_refreshing: settings.effective_serve_persisted(),
        }
    }
}

/// Observable state of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Nothing cached; the next query starts a discovery.
    Empty,
    /// A discovery is in flight.
    Populating,
    /// Results are cached.
    Populated,
}

enum EntryState {
    Empty,
    Populating(watch::Receiver<Option<Outcome>>),
    Populated(Arc<Vec<Interpreter>>),
}

struct EntryInner {
    generation: u64,
    state: EntryState,
}

struct CacheEntry {
    inner: Mutex<EntryInner>,
    run_lock: Arc<tokio::sync::Mutex<()>>,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            inner: Mutex::new(EntryInner {
                generation: 0,
                state: EntryState::Empty,
            }),
            run_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EntryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn status(&self) -> EntryStatus {
        match self.lock().state {
            EntryState::Empty => EntryStatus::Empty,
            EntryState::Populating(_) => EntryStatus::Populating,
            EntryState::Populated(_) => EntryStatus::Populated,
        }
    }

    /// Store the outcome of the run started at `generation`, unless the entry
    /// was invalidated since.
    fn complete(&self, generation: u64, outcome: &Outcome) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.state = match outcome {
            Ok(list) => EntryState::Populated(Arc::clone(list)),
            Err(_) => EntryState::Empty,
        };
        true
    }

    fn invalidate(&self) {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.state = EntryState::Empty;
    }
}

/// Locator that caches the results of a [`DiscoveryStrategy`] per scope.
///
/// # Example
///
/// ```ignore
/// let strategy = Arc::new(KnownPathsStrategy::new(paths, prober, scanner, resolver));
/// let locator = CachingLocator::new(strategy).with_store(store);
/// let interpreters = locator.get_interpreters(None).await?;
/// ```
pub struct CachingLocator {
    name: String,
    strategy: Arc<dyn DiscoveryStrategy>,
    store: Arc<dyn InterpreterCacheStore>,
    options: LocatorOptions,
    entries: RwLock<HashMap<ScopeKey, Arc<CacheEntry>>>,
    disposed: AtomicBool,
}

impl CachingLocator {
    /// Wrap `strategy` with default options and no persistence.
    pub fn new(strategy: Arc<dyn DiscoveryStrategy>) -> Self {
        Self {
            name: strategy.name().to_string(),
            strategy,
            store: Arc::new(NoopCacheStore),
            options: LocatorOptions::default(),
            entries: RwLock::new(HashMap::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Persist successful discoveries to `store`.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn InterpreterCacheStore>) -> Self {
        self.store = store;
        self
    }

    /// Override caching options.
    #[must_use]
    pub const fn with_options(mut self, options: LocatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Cache key used for `scope`.
    pub fn cache_key(&self, scope: Option<&Scope>) -> ScopeKey {
        if self.options.cache_per_scope {
            ScopeKey::for_scope(self.name.as_str(), scope)
        } else {
            ScopeKey::global(self.name.as_str())
        }
    }

    /// Current state of the entry for `scope`.
    pub fn status(&self, scope: Option<&Scope>) -> EntryStatus {
        let key = self.cache_key(scope);
        self.read_entries()
            .get(&key)
            .map_or(EntryStatus::Empty, |entry| entry.status())
    }

    /// Invalidate every cached scope, e.g. after a configuration change.
    pub fn invalidate_all(&self) {
        let entries = self.read_entries();
        for entry in entries.values() {
            entry.invalidate();
        }
        debug!(locator = %self.name, count = entries.len(), "Invalidated all cache entries");
    }

    /// Wait until the in-flight discovery for `scope`, if any, has finished.
    ///
    /// Useful for short-lived hosts that answered from a persisted snapshot and
    /// want the background refresh to land before exiting.
    pub async fn wait_for_refresh(&self, scope: Option<&Scope>) {
        let key = self.cache_key(scope);
        let in_flight = self
            .read_entries()
            .get(&key)
            .and_then(|entry| match &entry.lock().state {
                EntryState::Populating(rx) => Some(rx.clone()),
                _ => None,
            });

        if let Some(rx) = in_flight {
            if let Err(e) = Self::await_outcome(rx).await {
                debug!(key = %key, error = %e, "Background refresh failed");
            }
        }
    }

    /// Whether `dispose()` has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn ensure_live(&self) -> Result<(), LocatorError> {
        if self.is_disposed() {
            return Err(LocatorError::Disposed {
                locator: self.name.clone(),
            });
        }
        Ok(())
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ScopeKey, Arc<CacheEntry>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, key: &ScopeKey) -> Arc<CacheEntry> {
        if let Some(entry) = self.read_entries().get(key) {
            return Arc::clone(entry);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            entries
                .entry(key.clone())
                .or_insert_with(|| Arc::new(CacheEntry::new())),
        )
    }

    /// Spawn a discovery run for `key` and return the channel its outcome is
    /// published on.
    fn spawn_discovery(
        &self,
        key: &ScopeKey,
        scope: Option<&Scope>,
        entry: &Arc<CacheEntry>,
        generation: u64,
    ) -> watch::Receiver<Option<Outcome>> {
        let (tx, rx) = watch::channel(None);
        let strategy = Arc::clone(&self.strategy);
        let store = Arc::clone(&self.store);
        let entry = Arc::clone(entry);
        let key = key.clone();
        let scope = scope.cloned();
        let locator = self.name.clone();

        tokio::spawn(async move {
            let _running = Arc::clone(&entry.run_lock).lock_owned().await;
            debug!(locator = %locator, key = %key, generation, "Starting discovery");

            let outcome: Outcome = match AssertUnwindSafe(strategy.discover(scope.as_ref()))
                .catch_unwind()
                .await
            {
                Ok(result) => result.map(|found| Arc::new(dedupe_by_path(found))),
                Err(_) => Err(LocatorError::Internal(format!(
                    "discovery in '{locator}' panicked"
                ))),
            };

            match &outcome {
                Ok(list) => {
                    info!(locator = %locator, key = %key, count = list.len(), "Discovery complete");
                    if let Err(e) = store.save(&key, list).await {
                        warn!(key = %key, error = %e, "Failed to persist discovery results");
                    }
                }
                Err(e) => warn!(locator = %locator, key = %key, error = %e, "Discovery failed"),
            }

            if !entry.complete(generation, &outcome) {
                debug!(key = %key, generation, "Entry invalidated during discovery, result not cached");
            }
            tx.send_replace(Some(outcome));
        });

        rx
    }

    async fn persisted_snapshot(&self, key: &ScopeKey) -> Option<Vec<Interpreter>> {
        match self.store.load(key).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load persisted snapshot");
                None
            }
        }
    }

    async fn await_outcome(
        mut rx: watch::Receiver<Option<Outcome>>,
    ) -> Result<Vec<Interpreter>, LocatorError> {
        let outcome = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| LocatorError::Internal("discovery ended without a result".to_string()))?;

        match &*outcome {
            Some(Ok(list)) => Ok(list.as_ref().clone()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(LocatorError::Internal(
                "discovery ended without a result".to_string(),
            )),
        }
    }
}

#[async_trait]
impl InterpreterLocator for CachingLocator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_interpreters(
        &self,
        scope: Option<&Scope>,
    ) -> Result<Vec<Interpreter>, LocatorError> {
        self.ensure_live()?;

        let key = self.cache_key(scope);
        let entry = self.entry(&key);

        let rx = {
            let mut inner = entry.lock();
            let in_flight = match &inner.state {
                EntryState::Populated(list) => return Ok(list.as_ref().clone()),
                EntryState::Populating(rx) => Some(rx.clone()),
                EntryState::Empty => None,
            };
            match in_flight {
                Some(rx) => rx,
                None => {
                    let rx = self.spawn_discovery(&key, scope, &entry, inner.generation);
                    inner.state = EntryState::Populating(rx.clone());
                    rx
                }
            }
        };

        if self.options.serve_persisted_while_refreshing {
            if let Some(snapshot) = self.persisted_snapshot(&key).await {
                debug!(key = %key, count = snapshot.len(), "Serving persisted snapshot during refresh");
                return Ok(snapshot);
            }
        }

        Self::await_outcome(rx).await
    }

    fn invalidate(&self, scope: Option<&Scope>) {
        if self.is_disposed() {
            return;
        }
        let key = self.cache_key(scope);
        if let Some(entry) = self.read_entries().get(&key) {
            entry.invalidate();
            debug!(key = %key, "Invalidated cache entry");
        }
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.strategy.dispose();
        debug!(locator = %self.name, "Locator disposed");
    }
}
