//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the interpreter locator.
#[derive(Debug, Parser)]
#[command(name = "pyloc")]
#[command(about = "Find Python interpreters in well-known locations")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Directory for persisted discovery snapshots
    #[arg(long = "cache-dir", env = "PYLOC_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Do not read or write persisted snapshots
    #[arg(long = "no-persist", env = "PYLOC_NO_PERSIST", global = true)]
    pub no_persist: bool,

    /// JSON settings file
    #[arg(long = "config", env = "PYLOC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
