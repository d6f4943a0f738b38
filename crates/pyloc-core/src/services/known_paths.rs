//! Known-paths discovery strategy.
//!
//! Scans a fixed list of well-known directories for interpreter executables
//! and resolves a display name for each one. The strategy has no way to
//! classify environments, so every result is [`InterpreterKind::Unknown`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::debug;

use super::version_resolver::VersionResolver;
use crate::domain::{Interpreter, InterpreterKind, Scope, interpreter::fallback_label};
use crate::ports::{DiscoveryStrategy, InterpreterScanner, LocatorError, PathProber};

/// Name of the known-paths strategy, used as its cache-key prefix.
pub const KNOWN_PATHS_LOCATOR: &str = "known-paths";

/// Discovers interpreters in a configured list of search directories.
pub struct KnownPathsStrategy {
    search_paths: Vec<PathBuf>,
    prober: Arc<dyn PathProber>,
    scanner: Arc<dyn InterpreterScanner>,
    resolver: Arc<VersionResolver>,
}

impl KnownPathsStrategy {
    /// Create a new strategy over `search_paths`.
    pub fn new(
        search_paths: Vec<PathBuf>,
        prober: Arc<dyn PathProber>,
        scanner: Arc<dyn InterpreterScanner>,
        resolver: Arc<VersionResolver>,
    ) -> Self {
        Self {
            search_paths,
            prober,
            scanner,
            resolver,
        }
    }

    /// The directories this strategy scans, in order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    async fn interpreters_in_directory(&self, dir: &Path) -> Vec<PathBuf> {
        if self.prober.exists(dir).await {
            self.scanner.scan(dir).await
        } else {
            debug!(dir = %dir.display(), "Search directory does not exist, skipping");
            Vec::new()
        }
    }

    async fn interpreter_details(&self, path: PathBuf) -> Interpreter {
        let fallback = fallback_label(&path);
        let display_name = self.resolver.resolve(&path, &fallback).await;
        Interpreter::new(path, display_name).with_kind(InterpreterKind::Unknown)
    }
}

#[async_trait]
impl DiscoveryStrategy for KnownPathsStrategy {
    fn name(&self) -> &str {
        KNOWN_PATHS_LOCATOR
    }

    async fn discover(&self, _scope: Option<&Scope>) -> Result<Vec<Interpreter>, LocatorError> {
        let per_directory = join_all(
            self.search_paths
                .iter()
                .map(|dir| self.interpreters_in_directory(dir)),
        )
        .await;

        let candidates: Vec<PathBuf> = per_directory
            .into_iter()
            .flatten()
            .filter(|path| !path.as_os_str().is_empty())
            .collect();

        debug!(
            directories = self.search_paths.len(),
            candidates = candidates.len(),
            "Resolving interpreter versions"
        );

        Ok(join_all(
            candidates
                .into_iter()
                .map(|path| self.interpreter_details(path)),
        )
        .await)
    }

    fn dispose(&self) {}
}
