//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that call the composed locator or store and format output
//!   for the terminal

pub mod cache;
pub mod list;
pub mod paths;
