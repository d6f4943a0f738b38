//! Paths command handler.

use crate::bootstrap::CliContext;

/// Execute the paths command.
///
/// Prints the search paths in scan order, one per line, marking those that
/// do not exist.
pub fn execute(ctx: &CliContext) {
    for path in ctx.search_paths() {
        if path.is_dir() {
            println!("{}", path.display());
        } else {
            println!("{} (missing)", path.display());
        }
    }
}
