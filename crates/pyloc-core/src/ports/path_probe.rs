//! Filesystem probing ports.
//!
//! Both traits are infallible by contract: an unreadable or vanished location
//! is reported as absent/empty so that one bad directory never aborts a
//! discovery pass.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Checks whether a search directory exists before it is scanned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PathProber: Send + Sync {
    /// Return `true` if `path` exists.
    ///
    /// Errors other than "not found" are treated as non-existence.
    async fn exists(&self, path: &Path) -> bool;
}

/// Lists candidate interpreter executables directly inside a directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterpreterScanner: Send + Sync {
    /// Return the paths of interpreter-like executables in `dir`.
    ///
    /// Does not recurse. Returns an empty list when the directory is empty or
    /// can no longer be read.
    async fn scan(&self, dir: &Path) -> Vec<PathBuf>;
}
