//! Cache partitioning types.
//!
//! A [`Scope`] is whatever the caller uses to partition results (usually a
//! workspace folder). The caching layer turns it into a [`ScopeKey`], which
//! also carries the name of the locator that owns the cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Caller-supplied partition for interpreter queries.
///
/// The value is opaque to the discovery layer: two scopes are the same
/// partition exactly when their identifiers compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope(String);

impl Scope {
    /// Create a scope from an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a scope from a filesystem location such as a workspace folder.
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    /// The scope identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of one cache entry.
///
/// `partition` is `None` for the default (global) partition, which is used
/// when no scope was supplied or when the locator does not cache per scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeKey {
    /// Name of the locator that owns the entry.
    pub locator: String,
    /// Scope identifier, if any.
    pub partition: Option<String>,
}

impl ScopeKey {
    /// Key of the default partition for a locator.
    pub fn global(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            partition: None,
        }
    }

    /// Derive the key for an optional scope.
    pub fn for_scope(locator: impl Into<String>, scope: Option<&Scope>) -> Self {
        Self {
            locator: locator.into(),
            partition: scope.map(|s| s.as_str().to_owned()),
        }
    }

    /// Whether this is the default partition.
    pub const fn is_global(&self) -> bool {
        self.partition.is_none()
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.partition {
            Some(partition) => write!(f, "{}:{}", self.locator, partition),
            None => f.write_str(&self.locator),
        }
    }
}
