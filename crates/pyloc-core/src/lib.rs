//! Interpreter discovery core.
//!
//! Finds interpreter executables in well-known directories, resolves a
//! display name for each by asking it for its version, and caches the
//! results per scope. Filesystem and process access happen behind the
//! traits in [`ports`]; `pyloc-runtime` provides the OS adapters.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{Interpreter, InterpreterKind, Scope, ScopeKey, dedupe_by_path};
pub use paths::{
    PathError, Platform, expand_user_path, known_search_paths_for, resolve_search_paths,
};
pub use ports::{
    CacheStoreError, DiscoveryStrategy, InterpreterCacheStore, InterpreterLocator,
    InterpreterScanner, LocatorError, MemoryCacheStore, NoopCacheStore, PathProber, VersionError,
    VersionProvider,
};
pub use services::{
    CachingLocator, EntryStatus, InterpreterAggregator, KNOWN_PATHS_LOCATOR, KnownPathsStrategy,
    LocatorOptions, VersionResolver,
};
pub use settings::{
    DEFAULT_MAX_CONCURRENT_PROBES, DEFAULT_VERSION_TIMEOUT_MS, DiscoverySettings, SettingsError,
    validate_settings,
};
