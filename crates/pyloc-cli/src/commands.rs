//! Subcommands and their arguments.

use clap::{Args, Subcommand};
use pyloc_core::DiscoverySettings;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List discovered interpreters
    List(ListArgs),

    /// Show the directories that are searched, in order
    Paths(DiscoveryArgs),

    /// Manage persisted discovery snapshots
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
}

/// Arguments of `pyloc list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Scope to query, e.g. a workspace folder
    #[arg(long)]
    pub scope: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Ignore any persisted snapshot and rediscover
    #[arg(long)]
    pub refresh: bool,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,
}

/// Discovery overrides shared by commands that build a locator.
#[derive(Debug, Clone, Default, Args)]
pub struct DiscoveryArgs {
    /// Timeout for one interpreter version query, in milliseconds
    #[arg(long = "timeout-ms", env = "PYLOC_VERSION_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Maximum number of version queries running at once
    #[arg(long = "max-concurrent", env = "PYLOC_MAX_CONCURRENT")]
    pub max_concurrent: Option<usize>,

    /// Extra directory to search (repeatable)
    #[arg(long = "search-path", value_name = "DIR")]
    pub search_paths: Vec<String>,
}

impl DiscoveryArgs {
    /// Settings overlay holding only the values given on the command line.
    pub fn to_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            version_timeout_ms: self.timeout_ms,
            max_concurrent_probes: self.max_concurrent,
            extra_search_paths: self.search_paths.clone(),
            ..Default::default()
        }
    }
}

/// `pyloc cache` subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CacheCommand {
    /// Remove all persisted snapshots
    Clear,
}
