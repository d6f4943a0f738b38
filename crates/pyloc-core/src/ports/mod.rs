//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem implementation details in signatures
//! - Probing ports never fail: degraded results are expressed as empty/false
//! - Locator ports surface only strategy-level failures

pub mod cache_store;
pub mod locator;
pub mod path_probe;
pub mod version_provider;

use thiserror::Error;

pub use cache_store::{InterpreterCacheStore, MemoryCacheStore, NoopCacheStore};
pub use locator::{DiscoveryStrategy, InterpreterLocator};
pub use path_probe::{InterpreterScanner, PathProber};
pub use version_provider::VersionProvider;

/// Errors surfaced by locators and discovery strategies.
///
/// The type is `Clone` because one discovery outcome is delivered to every
/// caller waiting on the same cache entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocatorError {
    /// The locator was used after `dispose()`.
    #[error("Locator '{locator}' has been disposed")]
    Disposed { locator: String },

    /// The discovery strategy could not run at all.
    #[error("Discovery failed in '{locator}': {reason}")]
    DiscoveryFailed { locator: String, reason: String },

    /// Internal coordination failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LocatorError {
    /// Create a `DiscoveryFailed` error.
    pub fn discovery_failed(locator: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::DiscoveryFailed {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from querying an interpreter for its version.
///
/// These never escape discovery; the resolver maps them to the fallback label.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The executable could not be started.
    #[error("Failed to start {path}: {reason}")]
    SpawnFailed { path: String, reason: String },

    /// The executable exited unsuccessfully.
    #[error("{path} exited with code {code:?}")]
    NonZeroExit { path: String, code: Option<i32> },

    /// The executable printed nothing usable.
    #[error("{path} produced no version output")]
    EmptyOutput { path: String },

    /// The query exceeded its time budget.
    #[error("Version query for {path} timed out after {millis}ms")]
    Timeout { path: String, millis: u64 },
}

/// Errors from persisting cached discovery results.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    /// Reading or writing the backing storage failed.
    #[error("Cache storage error: {0}")]
    Io(String),

    /// The stored snapshot could not be encoded or decoded.
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}
