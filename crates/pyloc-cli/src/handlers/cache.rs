//! Cache command handlers.

use crate::bootstrap::CliContext;
use crate::commands::CacheCommand;
use crate::error::CliError;

/// Execute a `pyloc cache` subcommand.
pub async fn execute(ctx: &CliContext, command: CacheCommand) -> Result<(), CliError> {
    match command {
        CacheCommand::Clear => {
            let Some(dir) = &ctx.config.cache_dir else {
                println!("Persistence is disabled; nothing to clear.");
                return Ok(());
            };
            let removed = ctx.store().clear().await?;
            println!("Removed {removed} snapshot(s) from {}", dir.display());
        }
    }
    Ok(())
}
