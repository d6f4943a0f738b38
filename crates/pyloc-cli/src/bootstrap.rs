//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Filesystem prober and scanner (via pyloc-runtime)
//! - Process version provider (via pyloc-runtime)
//! - Snapshot store (via pyloc-runtime)
//! - Version resolver, known-paths strategy and caching locator (via pyloc-core)
//!
//! Command handlers receive the fully-composed context and delegate to it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pyloc_core::{
    CachingLocator, DiscoverySettings, InterpreterAggregator, InterpreterCacheStore,
    InterpreterLocator, KnownPathsStrategy, LocatorOptions, NoopCacheStore, Platform,
    VersionResolver, resolve_search_paths, validate_settings,
};
use pyloc_runtime::{DirectoryScanner, FsPathProber, JsonFileCacheStore, ProcessVersionProvider};
use tracing::debug;

use crate::commands::DiscoveryArgs;
use crate::error::CliError;
use crate::parser::Cli;

/// Default snapshot directory: `<user cache dir>/pyloc`.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("pyloc"))
}

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Effective discovery settings.
    pub settings: DiscoverySettings,
    /// Where snapshots are persisted; `None` disables persistence.
    pub cache_dir: Option<PathBuf>,
    /// Home directory used for home-relative search paths and `~` expansion.
    pub home: Option<PathBuf>,
}

impl CliConfig {
    /// Create config with default settings and paths.
    pub fn with_defaults() -> Self {
        Self {
            settings: DiscoverySettings::with_defaults(),
            cache_dir: default_cache_dir(),
            home: dirs::home_dir(),
        }
    }

    /// Build the config for one invocation.
    ///
    /// Layering, lowest to highest: defaults, settings file, flags and
    /// `PYLOC_*` environment variables. The result is validated.
    pub fn from_cli(cli: &Cli, overrides: &DiscoveryArgs) -> Result<Self, CliError> {
        let mut config = Self::with_defaults();

        if let Some(path) = &cli.config {
            config.settings.merge(&load_settings_file(path)?);
        }
        config.settings.merge(&overrides.to_settings());

        if let Some(dir) = &cli.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if cli.no_persist {
            config.cache_dir = None;
        }

        validate_settings(&config.settings)?;
        Ok(config)
    }

    /// Directories to scan, in order.
    pub fn search_paths(&self) -> Result<Vec<PathBuf>, CliError> {
        Ok(resolve_search_paths(
            Platform::current(),
            self.home.as_deref(),
            &self.settings.extra_search_paths,
        )?)
    }
}

/// Read a JSON settings file. Missing fields keep their defaults.
pub fn load_settings_file(path: &Path) -> Result<DiscoverySettings, CliError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&json)?)
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Query surface used by commands.
    pub locator: Arc<dyn InterpreterLocator>,
    /// The caching known-paths locator behind `locator`.
    pub known_paths: Arc<CachingLocator>,
    /// Snapshot store (a no-op store when persistence is disabled).
    pub store: Arc<dyn InterpreterCacheStore>,
    /// Effective search paths.
    pub search_paths: Vec<PathBuf>,
    /// The config this context was built from.
    pub config: CliConfig,
}

impl CliContext {
    /// Access the locator.
    pub fn locator(&self) -> &Arc<dyn InterpreterLocator> {
        &self.locator
    }

    /// Access the snapshot store.
    pub fn store(&self) -> &Arc<dyn InterpreterCacheStore> {
        &self.store
    }

    /// Access the effective search paths.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Resolves the search paths
/// 2. Creates the OS adapters
/// 3. Assembles the known-paths strategy behind a caching locator
/// 4. Wraps it in the aggregator callers query
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let search_paths = config.search_paths()?;
    debug!(count = search_paths.len(), "Resolved search paths");

    let resolver = Arc::new(VersionResolver::from_settings(
        Arc::new(ProcessVersionProvider::new()),
        &config.settings,
    ));
    let strategy = Arc::new(KnownPathsStrategy::new(
        search_paths.clone(),
        Arc::new(FsPathProber),
        Arc::new(DirectoryScanner::new()),
        resolver,
    ));

    let store: Arc<dyn InterpreterCacheStore> = match &config.cache_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "Persisting snapshots");
            Arc::new(JsonFileCacheStore::new(dir))
        }
        None => Arc::new(NoopCacheStore),
    };

    let known_paths = Arc::new(
        CachingLocator::new(strategy)
            .with_store(Arc::clone(&store))
            .with_options(LocatorOptions::from_settings(&config.settings)),
    );
    let locator: Arc<dyn InterpreterLocator> = Arc::new(InterpreterAggregator::new(vec![
        Arc::clone(&known_paths) as Arc<dyn InterpreterLocator>,
    ]));

    Ok(CliContext {
        locator,
        known_paths,
        store,
        search_paths,
        config,
    })
}
