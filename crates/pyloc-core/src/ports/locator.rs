//! Locator and discovery-strategy ports.
//!
//! A [`DiscoveryStrategy`] knows how to find interpreters; an
//! [`InterpreterLocator`] is what callers query. The caching layer turns any
//! strategy into a locator.

use async_trait::async_trait;

use super::LocatorError;
use crate::domain::{Interpreter, Scope};

/// An interchangeable interpreter discovery algorithm.
///
/// Strategies do the actual probing work on every call; they hold no cache.
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    /// Stable name, used as the cache-key prefix.
    fn name(&self) -> &str;

    /// Run one discovery pass.
    ///
    /// Per-candidate problems must be absorbed; only a failure that prevents
    /// the pass as a whole is returned as an error.
    async fn discover(&self, scope: Option<&Scope>) -> Result<Vec<Interpreter>, LocatorError>;

    /// Release held resources. Must be idempotent and must not panic.
    fn dispose(&self) {}
}

/// Query surface consumed by callers outside the discovery core.
#[async_trait]
pub trait InterpreterLocator: Send + Sync {
    /// Name used in logs and cache keys.
    fn name(&self) -> &str;

    /// Interpreters visible under `scope` (or the default partition).
    async fn get_interpreters(
        &self,
        scope: Option<&Scope>,
    ) -> Result<Vec<Interpreter>, LocatorError>;

    /// Drop cached results for `scope` so the next query rediscovers.
    fn invalidate(&self, scope: Option<&Scope>);

    /// Release held references. Idempotent.
    fn dispose(&self);
}
