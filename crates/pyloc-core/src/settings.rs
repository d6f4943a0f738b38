//! Discovery settings and validation.
//!
//! These are pure configuration types. Adapters decide where values come from
//! (CLI flags, environment variables, a settings file) and hand the merged
//! result to the bootstrap code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time budget for a single `--version` query.
pub const DEFAULT_VERSION_TIMEOUT_MS: u64 = 15_000;

/// Default cap on concurrently running version queries.
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 8;

/// Discovery settings.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Timeout for one interpreter version query, in milliseconds.
    pub version_timeout_ms: Option<u64>,

    /// Maximum number of version queries running at once.
    pub max_concurrent_probes: Option<usize>,

    /// Keep a separate cache entry per scope instead of one global entry.
    pub cache_per_scope: Option<bool>,

    /// Answer from the persisted snapshot while a refresh is in flight.
    pub serve_persisted_while_refreshing: Option<bool>,

    /// Additional directories to scan after the well-known ones.
    pub extra_search_paths: Vec<String>,
}

impl DiscoverySettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            version_timeout_ms: Some(DEFAULT_VERSION_TIMEOUT_MS),
            max_concurrent_probes: Some(DEFAULT_MAX_CONCURRENT_PROBES),
            cache_per_scope: Some(true),
            serve_persisted_while_refreshing: Some(false),
            extra_search_paths: Vec::new(),
        }
    }

    /// Get the effective version query timeout.
    #[must_use]
    pub const fn effective_version_timeout(&self) -> Duration {
        match self.version_timeout_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_millis(DEFAULT_VERSION_TIMEOUT_MS),
        }
    }

    /// Get the effective concurrency cap for version queries.
    #[must_use]
    pub const fn effective_max_concurrent_probes(&self) -> usize {
        match self.max_concurrent_probes {
            Some(n) => n,
            None => DEFAULT_MAX_CONCURRENT_PROBES,
        }
    }

    /// Whether results are cached per scope (default: true).
    #[must_use]
    pub fn effective_cache_per_scope(&self) -> bool {
        self.cache_per_scope.unwrap_or(true)
    }

    /// Whether persisted snapshots are served during refresh (default: false).
    #[must_use]
    pub fn effective_serve_persisted(&self) -> bool {
        self.serve_persisted_while_refreshing.unwrap_or(false)
    }

    /// Overlay another settings value, only taking fields that are set there.
    ///
    /// Extra search paths are appended rather than replaced.
    pub fn merge(&mut self, other: &Self) {
        if other.version_timeout_ms.is_some() {
            self.version_timeout_ms = other.version_timeout_ms;
        }
        if other.max_concurrent_probes.is_some() {
            self.max_concurrent_probes = other.max_concurrent_probes;
        }
        if other.cache_per_scope.is_some() {
            self.cache_per_scope = other.cache_per_scope;
        }
        if other.serve_persisted_while_refreshing.is_some() {
            self.serve_persisted_while_refreshing = other.serve_persisted_while_refreshing;
        }
        for path in &other.extra_search_paths {
            if !self.extra_search_paths.contains(path) {
                self.extra_search_paths.push(path.clone());
            }
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Version timeout must be between 100 and 300,000 ms, got {0}")]
    InvalidVersionTimeout(u64),

    #[error("Max concurrent probes must be between 1 and 256, got {0}")]
    InvalidConcurrency(usize),

    #[error("Extra search path cannot be empty")]
    EmptySearchPath,
}

/// Validate settings values.
pub fn validate_settings(settings: &DiscoverySettings) -> Result<(), SettingsError> {
    if let Some(ms) = settings.version_timeout_ms {
        if !(100..=300_000).contains(&ms) {
            return Err(SettingsError::InvalidVersionTimeout(ms));
        }
    }

    if let Some(n) = settings.max_concurrent_probes {
        if !(1..=256).contains(&n) {
            return Err(SettingsError::InvalidConcurrency(n));
        }
    }

    if settings
        .extra_search_paths
        .iter()
        .any(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptySearchPath);
    }

    Ok(())
}
