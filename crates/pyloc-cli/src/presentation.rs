//! Table formatting for CLI output.

use std::fmt::Write as _;

use pyloc_core::Interpreter;

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use pyloc_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Render interpreters as a fixed-width table with a header row.
pub fn interpreter_table(interpreters: &[Interpreter]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<28} {:<10} Path", "Name", "Kind");
    let _ = writeln!(out, "{}", "-".repeat(72));
    for interpreter in interpreters {
        let _ = writeln!(
            out,
            "{:<28} {:<10} {}",
            truncate_string(&interpreter.display_name, 27),
            interpreter.kind.label(),
            interpreter.path.display()
        );
    }
    out
}
