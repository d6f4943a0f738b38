//! List command handler.

use pyloc_core::Scope;

use crate::bootstrap::CliContext;
use crate::commands::ListArgs;
use crate::error::CliError;
use crate::presentation::interpreter_table;

/// Execute the list command.
///
/// Prints every discovered interpreter as a table, or as JSON with `--json`.
/// If the answer came from a persisted snapshot, waits for the background
/// refresh so the snapshot is up to date for the next run.
pub async fn execute(ctx: &CliContext, args: &ListArgs) -> Result<(), CliError> {
    let scope = args.scope.as_deref().map(Scope::new);
    let interpreters = ctx.locator().get_interpreters(scope.as_ref()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&interpreters)?);
    } else if interpreters.is_empty() {
        println!("No interpreters found.");
        println!("Use 'pyloc paths' to see which directories are searched.");
    } else {
        println!("Found {} interpreter(s):\n", interpreters.len());
        print!("{}", interpreter_table(&interpreters));
    }

    ctx.known_paths.wait_for_refresh(scope.as_ref()).await;
    ctx.locator().dispose();
    Ok(())
}
