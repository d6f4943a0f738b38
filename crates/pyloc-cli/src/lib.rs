//! `pyloc` command-line adapter.
//!
//! The library half holds the parser, the composition root and the command
//! handlers so they can be tested without spawning the binary.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for the integration tests
#[cfg(test)]
use tempfile as _;

// Dependencies used only by main.rs
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{CacheCommand, Commands, DiscoveryArgs, ListArgs};
pub use error::CliError;
pub use parser::Cli;
